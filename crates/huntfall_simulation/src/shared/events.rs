//! Outbox событий + общие входные события
//!
//! Контроллеры не знают про Bevy EventWriter: они пишут в свой EventQueue,
//! flush система дренирует очередь в Bevy events (с entity) в том же тике.

use bevy::prelude::*;

/// Упорядоченная очередь исходящих событий контроллера
///
/// Порядок drain == порядок push. Каждое событие наблюдается ровно один раз.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQueue<E> {
    pending: Vec<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> EventQueue<E> {
    pub fn push(&mut self, event: E) {
        self.pending.push(event);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, E> {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Event: внешний combat resolution решил что entity умер
///
/// Обрабатывается:
/// - locomotion (LocomotionController::die → PlayerDied)
/// - ai (ChaseController::die → EnemyDied, NavAgent stop)
#[derive(Event, Debug, Clone, Copy)]
pub struct KillRequest {
    pub entity: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_push_order() {
        let mut queue = EventQueue::default();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);

        let drained: Vec<i32> = queue.drain().collect();
        assert_eq!(drained, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }
}
