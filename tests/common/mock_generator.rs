//! Mock generation service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use gpt_log::error::{Error, Result};
use gpt_log::generation::{CompletionOptions, Generator};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Call record for `complete`
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteCall {
    pub prompt: String,
    pub options: CompletionOptions,
}

/// Generator that replays scripted completions
///
/// Queued responses are returned in call order. Once the queue is empty the
/// generator answers `Reply: Entry <n>` for the n-th call (1-based).
pub struct MockGenerator {
    responses: Mutex<VecDeque<Option<String>>>,
    calls: Mutex<Vec<CompleteCall>>,
    error_on_complete: Mutex<Option<String>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            error_on_complete: Mutex::new(None),
        }
    }

    /// Queue a completion
    pub fn push_response(&self, text: Option<&str>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(text.map(ToString::to_string));
    }

    /// Make `complete` return an error
    pub fn fail_complete(&self, msg: &str) {
        *self.error_on_complete.lock().unwrap() = Some(msg.to_string());
    }

    pub fn get_calls(&self) -> Vec<CompleteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Assert that the n-th prompt (0-based) mentions `needle`
    pub fn assert_prompt_contains(&self, index: usize, needle: &str) {
        let calls = self.get_calls();
        let prompt = &calls
            .get(index)
            .unwrap_or_else(|| panic!("no call #{index}, only {} calls", calls.len()))
            .prompt;
        assert!(
            prompt.contains(needle),
            "Expected prompt #{index} to contain {needle:?} but got:\n{prompt}"
        );
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<Option<String>> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(CompleteCall {
                prompt: prompt.to_string(),
                options: options.clone(),
            });
            calls.len()
        };

        if let Some(msg) = self.error_on_complete.lock().unwrap().as_ref() {
            return Err(Error::Generation(msg.clone()));
        }

        let scripted = self.responses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| Some(format!("Reply: Entry {call_number}"))))
    }
}
