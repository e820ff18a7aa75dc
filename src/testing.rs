//! In-memory timeline and pacer fixtures shared by the unit tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{ClientError, Item, ResourceClass, TimelineClient, Variant};
use crate::wipe::Pacer;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ResourceClass),
    Delete(Variant, String),
    Wait,
}


pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Remote collections backed by vectors. Successful deletes remove the item,
/// so re-listing the head converges the same way the real API does.
pub struct InMemoryTimeline {
    posts: Mutex<Vec<Item>>,
    likes: Mutex<Vec<Item>>,
    log: CallLog,
    failing_lists: HashSet<ResourceClass>,
    failing_deletes: HashSet<String>,
    // After this many list calls every collection reads as empty.
    exhaust_after: Option<usize>,
    list_calls: Mutex<usize>,
}

impl InMemoryTimeline {
    pub fn new(posts: Vec<Item>, likes: Vec<Item>) -> Self {
        Self {
            posts: Mutex::new(posts),
            likes: Mutex::new(likes),
            log: Arc::new(Mutex::new(Vec::new())),
            failing_lists: HashSet::new(),
            failing_deletes: HashSet::new(),
            exhaust_after: None,
            list_calls: Mutex::new(0),
        }
    }


    pub fn fail_list(mut self, class: ResourceClass) -> Self {
        self.failing_lists.insert(class);
        self
    }


    pub fn fail_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }


    pub fn exhaust_after(mut self, list_calls: usize) -> Self {
        self.exhaust_after = Some(list_calls);
        self
    }


    pub fn log(&self) -> CallLog {
        Arc::clone(&self.log)
    }


    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().clone()
    }


    pub fn deletes(&self) -> Vec<(Variant, String)> {
        self.log
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Delete(variant, id) => Some((*variant, id.clone())),
                _ => None,
            })
            .collect()
    }


    pub fn remaining(&self, class: ResourceClass) -> usize {
        self.collection(class).lock().len()
    }

    fn collection(&self, class: ResourceClass) -> &Mutex<Vec<Item>> {
        match class {
            ResourceClass::Posts => &self.posts,
            ResourceClass::Likes => &self.likes,
        }
    }

    fn list(&self, class: ResourceClass, count: usize) -> Result<Vec<Item>, ClientError> {
        self.log.lock().push(Call::List(class));
        if self.failing_lists.contains(&class) {
            return Err(ClientError::Api {
                status: 503,
                body: "Over capacity".to_string(),
            });
        }

        let mut calls = self.list_calls.lock();
        *calls += 1;
        if self.exhaust_after.is_some_and(|limit| *calls > limit) {
            return Ok(Vec::new());
        }

        Ok(self.collection(class).lock().iter().take(count).cloned().collect())
    }

    fn delete(&self, class: ResourceClass, variant: Variant, id: &str) -> Result<(), ClientError> {
        self.log.lock().push(Call::Delete(variant, id.to_string()));
        if self.failing_deletes.contains(id) {
            return Err(ClientError::Api {
                status: 500,
                body: "Internal error".to_string(),
            });
        }

        self.collection(class).lock().retain(|item| item.id != id);
        Ok(())
    }
}

#[async_trait]
impl TimelineClient for InMemoryTimeline {
    async fn list_posts(&self, _subject: &str, count: usize) -> Result<Vec<Item>, ClientError> {
        self.list(ResourceClass::Posts, count)
    }

    async fn list_likes(&self, _subject: &str, count: usize) -> Result<Vec<Item>, ClientError> {
        self.list(ResourceClass::Likes, count)
    }

    async fn delete_post(&self, id: &str) -> Result<(), ClientError> {
        self.delete(ResourceClass::Posts, Variant::Tweet, id)
    }

    async fn delete_repost(&self, id: &str) -> Result<(), ClientError> {
        self.delete(ResourceClass::Posts, Variant::Repost, id)
    }

    async fn delete_like(&self, id: &str) -> Result<(), ClientError> {
        self.delete(ResourceClass::Likes, Variant::Like, id)
    }
}

/// Zero-delay pacer that records each wait into a shared call log.
pub struct RecordingPacer {
    log: CallLog,
}

impl RecordingPacer {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn wait(&self) {
        self.log.lock().push(Call::Wait);
    }
}


pub fn tweets(ids: &[&str]) -> Vec<Item> {
    ids.iter().map(|id| Item::new(*id)).collect()
}


pub fn retweets(ids: &[&str]) -> Vec<Item> {
    ids.iter().map(|id| Item::repost(*id)).collect()
}
