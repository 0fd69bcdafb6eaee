//! Platform input translated into commands.
//!
//! Event callbacks only push into an [`InputQueue`]; the scene drains it at the
//! start of each frame so camera state is only touched from the frame loop.

use crate::camera::PointerSource;
use crate::constants::INPUT_QUEUE_CAPACITY;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputCommand {
    PointerDown { source: PointerSource, x: f32, y: f32 },
    PointerMove { source: PointerSource, x: f32, y: f32 },
    PointerUp { source: PointerSource },
    Resize { width: u32, height: u32 },
}

/// Bounded FIFO of pending commands.
///
/// A move directly following a move from the same source replaces it, and
/// consecutive resizes collapse to the last one. When full, the oldest move
/// is dropped, or the oldest command if no move is pending.
#[derive(Clone, Debug)]
pub struct InputQueue {
    pending: SmallVec<[InputCommand; 16]>,
    capacity: usize,
    dropped: u64,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(INPUT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: SmallVec::new(),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, command: InputCommand) {
        if let Some(last) = self.pending.last_mut() {
            let coalesce = match (*last, command) {
                (
                    InputCommand::PointerMove { source: a, .. },
                    InputCommand::PointerMove { source: b, .. },
                ) => a == b,
                (InputCommand::Resize { .. }, InputCommand::Resize { .. }) => true,
                _ => false,
            };
            if coalesce {
                *last = command;
                return;
            }
        }
        if self.pending.len() >= self.capacity {
            let victim = self
                .pending
                .iter()
                .position(|c| matches!(c, InputCommand::PointerMove { .. }))
                .unwrap_or(0);
            let lost = self.pending.remove(victim);
            self.dropped += 1;
            log::warn!(
                "[input] queue full ({}), dropped {:?} ({} total)",
                self.capacity,
                lost,
                self.dropped
            );
        }
        self.pending.push(command);
    }

    /// Takes every pending command in arrival order.
    pub fn drain(&mut self) -> SmallVec<[InputCommand; 16]> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(x: f32) -> InputCommand {
        InputCommand::PointerMove {
            source: PointerSource::Mouse,
            x,
            y: 0.0,
        }
    }

    #[test]
    fn moves_coalesce_but_not_across_a_down() {
        let mut q = InputQueue::default();
        q.push(mv(1.0));
        q.push(mv(2.0));
        q.push(InputCommand::PointerDown {
            source: PointerSource::Mouse,
            x: 2.0,
            y: 0.0,
        });
        q.push(mv(3.0));
        let cmds = q.drain();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], mv(2.0));
        assert!(q.is_empty());
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut q = InputQueue::with_capacity(2);
        q.push(InputCommand::PointerUp { source: PointerSource::Mouse });
        q.push(InputCommand::PointerUp { source: PointerSource::Touch });
        q.push(InputCommand::Resize { width: 1, height: 1 });
        assert_eq!(q.dropped(), 1);
        let cmds = q.drain();
        assert_eq!(cmds[0], InputCommand::PointerUp { source: PointerSource::Touch });
    }

    #[test]
    fn overflow_prefers_dropping_a_move_over_a_release() {
        let mut q = InputQueue::with_capacity(2);
        q.push(InputCommand::PointerUp { source: PointerSource::Mouse });
        q.push(mv(5.0));
        q.push(InputCommand::Resize { width: 1, height: 1 });
        assert_eq!(q.dropped(), 1);
        let cmds = q.drain();
        assert_eq!(
            cmds.as_slice(),
            &[
                InputCommand::PointerUp { source: PointerSource::Mouse },
                InputCommand::Resize { width: 1, height: 1 },
            ]
        );
    }
}
