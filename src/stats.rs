//! Dashboard counters.
//!
//! Counters are always recomputed from the stores, so the question count
//! equals the number of user messages across all conversations after every
//! mutation.

use crate::conversations::ConversationStore;
use crate::models::Stats;
use crate::papers::PaperStore;

pub fn collect(papers: &PaperStore, conversations: &ConversationStore) -> Stats {
    Stats {
        paper_count: papers.len(),
        conversation_count: conversations.len(),
        question_count: conversations.question_count(),
    }
}
