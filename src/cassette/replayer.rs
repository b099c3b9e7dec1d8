//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette's interactions, queued separately per `port::method`.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Queue every interaction of `cassette`, ordered by `seq`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut interactions = cassette.interactions.clone();
        interactions.sort_by_key(|i| i.seq);

        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction);
        }
        Self { queues }
    }

    /// Take the next interaction recorded for `port` and `method`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the available pairs when nothing was recorded
    /// for this pair, or when its interactions are used up.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            return Err(format!(
                "Cassette has no interactions recorded for {port}::{method}. \
                 Available: [{}]",
                available.join(", ")
            ));
        };
        queue
            .pop_front()
            .ok_or_else(|| format!("Cassette exhausted: no more interactions for {port}::{method}"))
    }
}
