//! Console adapter for development/testing
//!
//! Reads stdin lines as if they were texts from a fixed dev phone number and
//! prints the replies. The real SMS transport is an external collaborator;
//! this adapter exists so the whole pipeline can be driven locally.

use std::io::Write;

use crate::application::services::{MessageProcessor, ReplyHandlers};
use crate::domain::entities::InboundMessage;

pub struct ConsoleAdapter {
    dev_phone: String,
}

impl ConsoleAdapter {
    pub fn new(dev_phone: impl Into<String>) -> Self {
        Self {
            dev_phone: dev_phone.into(),
        }
    }

    pub async fn run<H: ReplyHandlers>(&self, processor: &MessageProcessor<H>) {
        tracing::info!("Starting console adapter (dev mode), sending as {}", self.dev_phone);
        println!("Type a message and press enter. Ctrl-D or /quit to exit.");

        loop {
            print!("[YOU] ");
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match std::io::stdin().read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("stdin read failed: {}", e);
                    break;
                }
            }

            let body = line.trim();
            if body.is_empty() {
                continue;
            }
            if body == "/quit" {
                break;
            }

            let inbound = InboundMessage::new(&self.dev_phone, body);
            let reply = processor.process(&inbound).await;
            println!("[BOT] {}", reply);
        }

        tracing::info!("Console adapter stopped");
    }
}
