//! Scripted item source for tests, demos, and offline practice.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use drillbag_core::error::SourceError;
use drillbag_core::model::{Choice, Item, PoolKey};
use drillbag_core::traits::ItemSource;

/// One scripted reply: a stem to serve, or a failure to inject.
#[derive(Debug, Clone)]
pub enum MockReply {
    Stem(String),
    Fail(SourceError),
}

enum Mode {
    /// Exact reply sequence; errors once the script runs dry.
    Scripted(Mutex<VecDeque<MockReply>>),
    /// Finite pool served round-robin forever.
    Cycling { items: Vec<Item>, next: AtomicUsize },
}

/// An in-process stand-in for the item service.
///
/// Every call mints a fresh server-style item id, matching the real
/// service's behavior of never reusing ids even for identical stems.
pub struct MockItemSource {
    mode: Mode,
    calls: AtomicU32,
    last_pool: Mutex<Option<PoolKey>>,
}

impl MockItemSource {
    /// Replay the given replies in order, then fail with a transport error.
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        Self {
            mode: Mode::Scripted(Mutex::new(replies.into())),
            calls: AtomicU32::new(0),
            last_pool: Mutex::new(None),
        }
    }

    /// Serve `stems` round-robin, modelling a finite pool.
    pub fn cycling(stems: Vec<String>) -> Self {
        let items = stems.into_iter().map(|stem| practice_item(&stem)).collect();
        Self {
            mode: Mode::Cycling {
                items,
                next: AtomicUsize::new(0),
            },
            calls: AtomicU32::new(0),
            last_pool: Mutex::new(None),
        }
    }

    /// Degenerate single-item pool: the same stem on every call.
    pub fn repeating(stem: &str) -> Self {
        Self::cycling(vec![stem.to_string()])
    }

    /// Built-in bank of math items, used by offline practice.
    pub fn demo() -> Self {
        let items = demo_items();
        Self {
            mode: Mode::Cycling {
                items,
                next: AtomicUsize::new(0),
            },
            calls: AtomicU32::new(0),
            last_pool: Mutex::new(None),
        }
    }

    /// Number of `generate` calls received.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Pool key of the most recent call.
    pub fn last_pool(&self) -> Option<PoolKey> {
        self.last_pool.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemSource for MockItemSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, pool: &PoolKey) -> Result<Item, SourceError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        *self.last_pool.lock().unwrap() = Some(pool.clone());

        let mut item = match &self.mode {
            Mode::Scripted(replies) => {
                match replies.lock().unwrap().pop_front() {
                    Some(MockReply::Stem(stem)) => practice_item(&stem),
                    Some(MockReply::Fail(err)) => return Err(err),
                    None => {
                        return Err(SourceError::Transport("mock script ran dry".to_string()))
                    }
                }
            }
            Mode::Cycling { items, next } => {
                let idx = next.fetch_add(1, Ordering::Relaxed) % items.len();
                items[idx].clone()
            }
        };

        item.item_id = Some(format!("mock-{call:04}"));
        Ok(item)
    }
}

/// Wrap a bare stem in a well-formed four-choice item.
fn practice_item(stem: &str) -> Item {
    Item {
        item_id: None,
        stem: stem.to_string(),
        choices: ["a", "b", "c", "d"]
            .iter()
            .map(|id| Choice {
                id: (*id).to_string(),
                text: format!("choice {id}"),
            })
            .collect(),
        solution_choice_id: "a".to_string(),
        explanation: None,
    }
}

fn demo_items() -> Vec<Item> {
    fn item(stem: &str, choices: [&str; 4], solution: &str, explanation: &str) -> Item {
        Item {
            item_id: None,
            stem: stem.to_string(),
            choices: ["a", "b", "c", "d"]
                .iter()
                .zip(choices)
                .map(|(id, text)| Choice {
                    id: (*id).to_string(),
                    text: text.to_string(),
                })
                .collect(),
            solution_choice_id: solution.to_string(),
            explanation: Some(explanation.to_string()),
        }
    }

    vec![
        item(
            "Solve 2x + 3 = 11 for x.",
            ["x = 3", "x = 4", "x = 5", "x = 7"],
            "b",
            "Subtract 3 from both sides, then divide by 2.",
        ),
        item(
            "What is the vertex of y = (x - 2)^2 + 5?",
            ["(2, 5)", "(-2, 5)", "(2, -5)", "(5, 2)"],
            "a",
            "Vertex form y = (x - h)^2 + k has vertex (h, k).",
        ),
        item(
            "Factor x^2 - 5x + 6.",
            [
                "(x - 2)(x - 3)",
                "(x + 2)(x + 3)",
                "(x - 1)(x - 6)",
                "(x + 1)(x - 6)",
            ],
            "a",
            "Find two numbers that multiply to 6 and add to -5: -2 and -3.",
        ),
        item(
            "What is the slope of the line through (1, 2) and (3, 10)?",
            ["2", "3", "4", "8"],
            "c",
            "Slope is rise over run: (10 - 2) / (3 - 1) = 4.",
        ),
        item(
            "Simplify 3(x + 4) - 2x.",
            ["x + 12", "x + 4", "5x + 12", "x - 12"],
            "a",
            "Distribute to get 3x + 12, then subtract 2x.",
        ),
        item(
            "If f(x) = x^2 - 1, what is f(4)?",
            ["15", "16", "7", "17"],
            "a",
            "f(4) = 4^2 - 1 = 16 - 1 = 15.",
        ),
    ]
}
