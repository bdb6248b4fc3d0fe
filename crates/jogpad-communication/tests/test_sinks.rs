use jogpad_communication::{ChannelSink, CommandSink, RecordingSink, WriterSink};
use jogpad_core::ConnectionError;
use std::sync::{Arc, Mutex};

// Mock sink that drops the connection after a fixed number of lines
struct FlakySink {
    sent: Arc<Mutex<Vec<String>>>,
    budget: usize,
}

impl CommandSink for FlakySink {
    fn send_line(&mut self, line: &str) -> jogpad_core::Result<()> {
        if self.budget == 0 {
            return Err(ConnectionError::ConnectionLost {
                reason: "cable unplugged".to_string(),
            }
            .into());
        }
        self.budget -= 1;
        self.sent.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.budget > 0
    }
}

#[test]
fn test_custom_sink_behind_trait_object() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let mut sink: Box<dyn CommandSink> = Box::new(FlakySink {
        sent: sent.clone(),
        budget: 1,
    });

    assert!(sink.is_open());
    sink.send_line("G91 G0 X1").unwrap();
    assert!(!sink.is_open());

    let err = sink.send_line("G90").unwrap_err();
    assert!(err.is_connection_error());
    assert_eq!(err.to_string(), "Connection lost: cable unplugged");
    assert_eq!(*sent.lock().unwrap(), vec!["G91 G0 X1".to_string()]);
}

#[test]
fn test_writer_sink_preserves_order() {
    let mut sink = WriterSink::new(Vec::new());
    for line in ["G91 G1 F1500 X2.5", "G90", "G0 X0 Y0"] {
        sink.send_line(line).unwrap();
    }
    let written = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(written.lines().collect::<Vec<_>>(), vec!["G91 G1 F1500 X2.5", "G90", "G0 X0 Y0"]);
}

#[test]
fn test_recording_sink_clones_see_same_lines() {
    let recorder = RecordingSink::new();
    let mut a = recorder.clone();
    let mut b = recorder.clone();
    a.send_line("G0 Z0").unwrap();
    b.send_line("G90").unwrap();
    assert_eq!(recorder.len(), 2);
    assert_eq!(recorder.lines(), vec!["G0 Z0", "G90"]);
}

#[tokio::test]
async fn test_channel_sink_feeds_transport_task() {
    let (mut sink, mut rx) = ChannelSink::new();

    let transport = tokio::spawn(async move {
        let mut received = Vec::new();
        while let Some(line) = rx.recv().await {
            received.push(line);
        }
        received
    });

    sink.send_line("G91 G0 Y-1").unwrap();
    sink.send_line("G90").unwrap();
    drop(sink);

    let received = transport.await.unwrap();
    assert_eq!(received, vec!["G91 G0 Y-1".to_string(), "G90".to_string()]);
}
