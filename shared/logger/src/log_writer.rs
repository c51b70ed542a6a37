//! Log file writer running on its own thread.

use crate::error::Result;
use crate::log_message::{Command, LogMessage};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::Receiver;

/// Owns the log file; fed by every clone of a logger.
pub(crate) struct LogWriter {
    file: BufWriter<File>,
}

impl LogWriter {
    /// Opens or creates the file in append mode.
    pub fn new(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    fn write_message(&mut self, message: &LogMessage) {
        if let Err(e) = self.file.write_all(message.format().as_bytes()) {
            eprintln!("Error writing log: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.file.flush() {
            eprintln!("Error flushing log: {}", e);
        }
    }

    /// Processes commands until every sender is gone, then flushes.
    pub fn run(mut self, receiver: Receiver<Command>) {
        for command in receiver {
            match command {
                Command::Write(message) => self.write_message(&message),
                Command::Flush(ack) => {
                    self.flush();
                    let _ = ack.send(());
                }
            }
        }
        self.flush();
    }
}

/// Opens the log file and spawns the writer thread for it.
pub(crate) fn spawn_writer_thread(log_path: &Path, receiver: Receiver<Command>) -> Result<()> {
    let writer = LogWriter::new(log_path)?;
    std::thread::Builder::new()
        .name("log-writer".to_string())
        .spawn(move || writer.run(receiver))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_level::LogLevel;
    use std::fs;
    use std::sync::mpsc::channel;
    use tempfile::tempdir;

    #[test]
    fn test_log_writer_creation() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("bench.log");

        let writer = LogWriter::new(&log_path);
        assert!(writer.is_ok());
        assert!(log_path.exists());
    }

    #[test]
    fn test_write_message_after_flush() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("bench.log");

        let mut writer = LogWriter::new(&log_path).unwrap();
        let message = LogMessage::new(LogLevel::Info, None, "Parsed 3 documents".to_string());
        writer.write_message(&message);
        writer.flush();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("INFO"));
        assert!(content.contains("Parsed 3 documents"));
    }

    #[test]
    fn test_flush_command_is_acknowledged() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("bench.log");
        let (sender, receiver) = channel();

        spawn_writer_thread(&log_path, receiver).unwrap();

        sender
            .send(Command::Write(LogMessage::new(
                LogLevel::Debug,
                None,
                "Thread test".to_string(),
            )))
            .unwrap();
        let (ack_sender, ack_receiver) = channel();
        sender.send(Command::Flush(ack_sender)).unwrap();
        ack_receiver.recv().unwrap();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Thread test"));
    }
}
