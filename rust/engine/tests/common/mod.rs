#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bloodgamble_engine::controller::{Controllers, Intent, SeatController, TurnView};
use bloodgamble_engine::errors::GameError;
use bloodgamble_engine::events::TableEvent;
use bloodgamble_engine::seat::PlayerDecision;

/// Plays a fixed list of intents, then falls back to `fallback`.
pub struct Scripted {
    pub script: VecDeque<Intent>,
    pub fallback: PlayerDecision,
    pub views: Rc<RefCell<Vec<TurnView>>>,
    pub events: Rc<RefCell<Vec<TableEvent>>>,
}

impl Scripted {
    pub fn always(decision: PlayerDecision) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: decision,
            views: Rc::default(),
            events: Rc::default(),
        }
    }

    pub fn with_script(script: Vec<Intent>, fallback: PlayerDecision) -> Self {
        Self {
            script: script.into(),
            ..Self::always(fallback)
        }
    }
}

impl SeatController for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, view: &TurnView) -> Result<Intent, GameError> {
        self.views.borrow_mut().push(view.clone());
        Ok(self
            .script
            .pop_front()
            .unwrap_or(Intent::Act(self.fallback)))
    }

    fn observe(&mut self, event: &TableEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

pub fn boxed(seats: [Scripted; 4]) -> Controllers<'static> {
    seats.map(|s| Box::new(s) as Box<dyn SeatController>)
}

pub fn all(decision: PlayerDecision) -> Controllers<'static> {
    boxed(std::array::from_fn(|_| Scripted::always(decision)))
}
