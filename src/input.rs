//! Input translation
//!
//! The platform layer reports which controls are held and where the cursor
//! is. Once per physics tick the translator turns that snapshot into an
//! ordered list of semantic events:
//! - movement, jump, hook, dash and portal repeat every tick while held
//! - menu navigation, validate, help and quit fire once per press
//! - pause and slow motion fire once per press and at most once per
//!   debounce interval of real time

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TOGGLE_DEBOUNCE_MS;
use crate::sim::SimContext;

/// Either binding keeps the hook out
const HOOK_CONTROLS: [Control; 2] = [Control::Hook, Control::MouseHook];

/// Semantic event consumed by scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,
    Hook,
    StopHook,
    Dash,
    Portal,
    Pause,
    SlowMotion,
    Validate,
    Help,
    Quit,
}

/// Logical control, already resolved from a physical key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Jump,
    /// Keyboard hook binding
    Hook,
    /// Mouse hook binding
    MouseHook,
    Dash,
    Portal,
    Validate,
    Help,
    Quit,
    Pause,
    SlowMotion,
}

/// Raw device snapshot for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    pub held: HashSet<Control>,
    /// Cursor in world coordinates
    pub cursor: Vec2,
}

impl DeviceState {
    pub fn with(mut self, control: Control) -> Self {
        self.held.insert(control);
        self
    }

    pub fn with_cursor(mut self, cursor: Vec2) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }
}

/// Which mapping the active scene wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Gameplay,
    Menu,
}

/// Events and aim point for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub events: Vec<GameEvent>,
    /// Target for hook and portal shots
    pub aim: Vec2,
}

impl TickInput {
    pub fn new(events: Vec<GameEvent>, aim: Vec2) -> Self {
        Self { events, aim }
    }

    pub fn contains(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }
}

/// Stateful device-to-event mapper
#[derive(Debug, Default)]
pub struct InputTranslator {
    previous: HashSet<Control>,
    last_pause_ms: Option<u64>,
    last_slow_ms: Option<u64>,
    input: TickInput,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append this tick's events for `device`
    pub fn update(&mut self, device: &DeviceState, mode: InputMode, ctx: &SimContext) {
        self.input.aim = device.cursor;

        match mode {
            InputMode::Menu => self.update_menu(device),
            InputMode::Gameplay => self.update_gameplay(device, ctx),
        }

        let mut held = device.held.clone();
        if mode == InputMode::Gameplay && ctx.paused {
            // Hook state is frozen while paused so a release is reported on resume
            for control in HOOK_CONTROLS {
                if self.previous.contains(&control) {
                    held.insert(control);
                } else {
                    held.remove(&control);
                }
            }
        }
        self.previous = held;
    }

    /// Events collected since the last clear
    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Drop dispatched events
    pub fn clear(&mut self) {
        self.input.events.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    fn pressed(&self, device: &DeviceState, control: Control) -> bool {
        device.is_held(control) && !self.previous.contains(&control)
    }

    fn released(&self, device: &DeviceState, control: Control) -> bool {
        !device.is_held(control) && self.previous.contains(&control)
    }

    fn push(&mut self, event: GameEvent) {
        self.input.events.push(event);
    }

    fn update_menu(&mut self, device: &DeviceState) {
        let edges = [
            (Control::Up, GameEvent::MoveUp),
            (Control::Down, GameEvent::MoveDown),
            (Control::Left, GameEvent::MoveLeft),
            (Control::Right, GameEvent::MoveRight),
            (Control::Validate, GameEvent::Validate),
            (Control::Quit, GameEvent::Quit),
        ];
        for (control, event) in edges {
            if self.pressed(device, control) {
                self.push(event);
            }
        }
    }

    fn update_gameplay(&mut self, device: &DeviceState, ctx: &SimContext) {
        if ctx.debug {
            if self.pressed(device, Control::Pause) && debounced(&mut self.last_pause_ms, ctx.now_ms) {
                self.push(GameEvent::Pause);
            }
            if self.pressed(device, Control::SlowMotion)
                && debounced(&mut self.last_slow_ms, ctx.now_ms)
            {
                self.push(GameEvent::SlowMotion);
            }
        }

        if ctx.paused {
            return;
        }

        if self.pressed(device, Control::Help) {
            self.push(GameEvent::Help);
        }
        if self.pressed(device, Control::Quit) {
            self.push(GameEvent::Quit);
        }

        let held = [
            (Control::Left, GameEvent::MoveLeft),
            (Control::Right, GameEvent::MoveRight),
            (Control::Jump, GameEvent::Jump),
        ];
        for (control, event) in held {
            if device.is_held(control) {
                self.push(event);
            }
        }

        if HOOK_CONTROLS.iter().any(|&c| device.is_held(c)) {
            self.push(GameEvent::Hook);
        } else if HOOK_CONTROLS.iter().any(|&c| self.released(device, c)) {
            self.push(GameEvent::StopHook);
        }

        if device.is_held(Control::Dash) {
            self.push(GameEvent::Dash);
        }
        if device.is_held(Control::Portal) {
            self.push(GameEvent::Portal);
        }
        if self.pressed(device, Control::Validate) {
            self.push(GameEvent::Validate);
        }
    }
}

/// Accept a toggle if the previous one is older than the debounce interval
fn debounced(last_ms: &mut Option<u64>, now_ms: u64) -> bool {
    let ready = last_ms.is_none_or(|last| now_ms.saturating_sub(last) > TOGGLE_DEBOUNCE_MS);
    if ready {
        *last_ms = Some(now_ms);
    }
    ready
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_at(now_ms: u64) -> SimContext {
        SimContext {
            debug: true,
            now_ms,
            ..Default::default()
        }
    }

    fn tick(
        translator: &mut InputTranslator,
        device: &DeviceState,
        mode: InputMode,
        ctx: &SimContext,
    ) -> Vec<GameEvent> {
        translator.update(device, mode, ctx);
        let events = translator.input().events.clone();
        translator.clear();
        events
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut translator = InputTranslator::new();
        let device = DeviceState::default().with(Control::Right).with(Control::Jump);
        for _ in 0..3 {
            assert_eq!(
                tick(&mut translator, &device, InputMode::Gameplay, &ctx_at(0)),
                vec![GameEvent::MoveRight, GameEvent::Jump]
            );
        }
    }

    #[test]
    fn test_validate_is_edge_triggered() {
        let mut translator = InputTranslator::new();
        let held = DeviceState::default().with(Control::Validate);
        let ctx = ctx_at(0);

        assert_eq!(tick(&mut translator, &held, InputMode::Menu, &ctx), vec![GameEvent::Validate]);
        assert!(tick(&mut translator, &held, InputMode::Menu, &ctx).is_empty());
        assert!(tick(&mut translator, &DeviceState::default(), InputMode::Menu, &ctx).is_empty());
        assert_eq!(tick(&mut translator, &held, InputMode::Menu, &ctx), vec![GameEvent::Validate]);
    }

    #[test]
    fn test_menu_ignores_gameplay_controls() {
        let mut translator = InputTranslator::new();
        let device = DeviceState::default().with(Control::Down).with(Control::Jump);
        assert_eq!(
            tick(&mut translator, &device, InputMode::Menu, &ctx_at(0)),
            vec![GameEvent::MoveDown]
        );
    }

    #[test]
    fn test_pause_is_debounced() {
        let mut translator = InputTranslator::new();
        let pressed = DeviceState::default().with(Control::Pause);
        let released = DeviceState::default();

        assert_eq!(
            tick(&mut translator, &pressed, InputMode::Gameplay, &ctx_at(1_000)),
            vec![GameEvent::Pause]
        );
        tick(&mut translator, &released, InputMode::Gameplay, &ctx_at(1_020));
        // a second press inside the interval is swallowed
        assert!(tick(&mut translator, &pressed, InputMode::Gameplay, &ctx_at(1_050)).is_empty());
        tick(&mut translator, &released, InputMode::Gameplay, &ctx_at(1_100));
        assert_eq!(
            tick(&mut translator, &pressed, InputMode::Gameplay, &ctx_at(1_200)),
            vec![GameEvent::Pause]
        );
    }

    #[test]
    fn test_toggles_need_debug() {
        let mut translator = InputTranslator::new();
        let device = DeviceState::default().with(Control::Pause).with(Control::SlowMotion);
        let ctx = SimContext::default();
        assert!(tick(&mut translator, &device, InputMode::Gameplay, &ctx).is_empty());
    }

    #[test]
    fn test_paused_only_emits_toggles() {
        let mut translator = InputTranslator::new();
        let device = DeviceState::default().with(Control::Right).with(Control::SlowMotion);
        let ctx = SimContext {
            paused: true,
            ..ctx_at(0)
        };
        assert_eq!(
            tick(&mut translator, &device, InputMode::Gameplay, &ctx),
            vec![GameEvent::SlowMotion]
        );
    }

    #[test]
    fn test_hook_release_emits_stop_once() {
        let mut translator = InputTranslator::new();
        let ctx = ctx_at(0);
        let aiming = DeviceState::default()
            .with(Control::MouseHook)
            .with_cursor(Vec2::new(300.0, 40.0));

        assert_eq!(
            tick(&mut translator, &aiming, InputMode::Gameplay, &ctx),
            vec![GameEvent::Hook]
        );
        assert_eq!(translator.input().aim, Vec2::new(300.0, 40.0));

        let idle = DeviceState::default();
        assert_eq!(
            tick(&mut translator, &idle, InputMode::Gameplay, &ctx),
            vec![GameEvent::StopHook]
        );
        assert!(tick(&mut translator, &idle, InputMode::Gameplay, &ctx).is_empty());
    }

    #[test]
    fn test_hook_release_during_pause_reported_on_resume() {
        let mut translator = InputTranslator::new();
        let hooking = DeviceState::default().with(Control::Hook);
        assert_eq!(
            tick(&mut translator, &hooking, InputMode::Gameplay, &ctx_at(0)),
            vec![GameEvent::Hook]
        );

        let paused = SimContext {
            paused: true,
            ..ctx_at(10)
        };
        let idle = DeviceState::default();
        for _ in 0..5 {
            assert!(tick(&mut translator, &idle, InputMode::Gameplay, &paused).is_empty());
        }

        assert_eq!(
            tick(&mut translator, &idle, InputMode::Gameplay, &ctx_at(100)),
            vec![GameEvent::StopHook]
        );
        assert!(tick(&mut translator, &idle, InputMode::Gameplay, &ctx_at(110)).is_empty());
    }

    #[test]
    fn test_clear_empties_events() {
        let mut translator = InputTranslator::new();
        translator.update(
            &DeviceState::default().with(Control::Left),
            InputMode::Gameplay,
            &ctx_at(0),
        );
        assert!(!translator.input().events.is_empty());
        translator.clear();
        assert!(translator.input().events.is_empty());
    }
}
