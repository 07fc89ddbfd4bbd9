//! Timeline orchestration
//!
//! A timeline is an ordered list of cues, each with an offset from the moment
//! the timeline is started. Starting a timeline schedules every cue on a
//! [`TimerQueue`]; cues sharing an offset fire in the order they were added.

use crate::scheduler::{Millis, TimerId, TimerQueue};

/// A payload scheduled at an offset from timeline start
#[derive(Clone, Debug, PartialEq)]
pub struct Cue<C> {
    pub offset: Millis,
    pub payload: C,
}

/// Ordered collection of cues
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<C> {
    cues: Vec<Cue<C>>,
}

impl<C> Timeline<C> {
    pub fn new() -> Self {
        Self { cues: Vec::new() }
    }

    /// Add a cue (builder style)
    pub fn at(mut self, offset: Millis, payload: C) -> Self {
        self.push(offset, payload);
        self
    }

    pub fn push(&mut self, offset: Millis, payload: C) {
        self.cues.push(Cue { offset, payload });
    }

    /// Append a staggered group of cues
    pub fn stagger(mut self, group: StaggerBuilder<C>) -> Self {
        self.cues.extend(group.build());
        self
    }

    pub fn cues(&self) -> &[Cue<C>] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Offset of the last cue
    pub fn duration(&self) -> Millis {
        self.cues.iter().map(|c| c.offset).max().unwrap_or(0)
    }
}

impl<C: Clone> Timeline<C> {
    /// Schedule every cue relative to the queue's current time
    pub fn schedule_into(&self, queue: &mut TimerQueue<C>) -> Vec<TimerId> {
        self.cues
            .iter()
            .map(|cue| queue.schedule(cue.offset, cue.payload.clone()))
            .collect()
    }
}

impl<C> Default for Timeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a group of cues that share a base offset plus per-item delays
#[derive(Clone, Debug)]
pub struct StaggerBuilder<C> {
    base: Millis,
    cues: Vec<Cue<C>>,
}

impl<C> StaggerBuilder<C> {
    pub fn new(base: Millis) -> Self {
        Self {
            base,
            cues: Vec::new(),
        }
    }

    /// Add an item firing `delay` ms after the group's base offset
    pub fn item(mut self, delay: Millis, payload: C) -> Self {
        self.cues.push(Cue {
            offset: self.base.saturating_add(delay),
            payload,
        });
        self
    }

    pub fn build(self) -> Vec<Cue<C>> {
        self.cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_offsets() {
        let timeline = Timeline::new()
            .at(0, "intro")
            .stagger(StaggerBuilder::new(2200).item(0, "a").item(200, "b").item(400, "c"))
            .at(3200, "outro");

        let offsets: Vec<_> = timeline.cues().iter().map(|c| (c.offset, c.payload)).collect();
        assert_eq!(
            offsets,
            vec![(0, "intro"), (2200, "a"), (2400, "b"), (2600, "c"), (3200, "outro")]
        );
        assert_eq!(timeline.duration(), 3200);
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut queue = TimerQueue::new();
        assert_eq!(queue.pop_due(1000), None);

        let timeline = Timeline::new().at(800, 2).at(0, 1);
        let ids = timeline.schedule_into(&mut queue);
        assert_eq!(ids.len(), 2);
        assert_eq!(queue.deadline(ids[0]), Some(1800));

        assert_eq!(queue.pop_due(5000), Some(1));
        assert_eq!(queue.now(), 1000);
        assert_eq!(queue.pop_due(5000), Some(2));
        assert_eq!(queue.now(), 1800);
    }
}
