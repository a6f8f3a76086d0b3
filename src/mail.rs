//! Outgoing mail
//!
//! Delivery itself is left to an implementation of [`Mailer`]. [`MemoryMailer`] keeps
//! the messages for inspection and [`DirectoryMailer`] drops them into an outbox folder.
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::MailError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub filename: String,
    /// Base64 encoded content
    pub content: String,
}

impl Attachment {
    pub fn new(filename: &str, content: &[u8]) -> Attachment {
        Attachment {
            filename: filename.to_string(),
            content: STANDARD.encode(content),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, MailError> {
        STANDARD
            .decode(&self.content)
            .map_err(|e| MailError::Delivery(format!("bad attachment {}: {}", self.filename, e)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        MemoryMailer::default()
    }

    /// The messages sent so far, oldest first
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(email);
        Ok(())
    }
}

/// Writes every message as `<stamp>-message.html` plus one file per attachment
#[derive(Debug, Clone)]
pub struct DirectoryMailer {
    outbox: PathBuf,
}

impl DirectoryMailer {
    pub fn new<P: AsRef<Path>>(outbox: P) -> Self {
        DirectoryMailer {
            outbox: outbox.as_ref().to_path_buf(),
        }
    }

    /// Creates `<prefix>-message.html` under a prefix no earlier message has used
    ///
    /// The prefix is the timestamp, followed by a sequence number when messages share
    /// the same millisecond.
    fn create_message_file(&self) -> Result<(String, PathBuf, File), MailError> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f").to_string();
        let mut sequence = 0;
        loop {
            let prefix = if sequence == 0 {
                stamp.clone()
            } else {
                format!("{}-{}", stamp, sequence)
            };
            let path = self.outbox.join(format!("{}-message.html", prefix));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((prefix, path, file)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => sequence += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[async_trait]
impl Mailer for DirectoryMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        fs::create_dir_all(&self.outbox)?;
        let (prefix, message, mut file) = self.create_message_file()?;
        write!(
            file,
            "<!-- From: {}\n     To: {}\n     Subject: {} -->\n{}",
            email.from, email.to, email.subject, email.html
        )?;
        for attachment in email.attachments.iter() {
            let path = self
                .outbox
                .join(format!("{}-{}", prefix, attachment.filename));
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)?
                .write_all(&attachment.decode()?)?;
        }
        info!("Mail {:?} written to {:?}", email.subject, message);
        Ok(())
    }
}
