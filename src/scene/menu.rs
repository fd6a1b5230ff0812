//! Main menu

use std::time::Duration;

use super::{Scene, SceneId};
use crate::error::Result;
use crate::input::{GameEvent, InputMode, TickInput};
use crate::render::{Hud, MenuView};
use crate::sim::SimContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Tutorial,
    RandomGame,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Tutorial, MenuItem::RandomGame, MenuItem::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Tutorial => "Tutorial",
            MenuItem::RandomGame => "Random game",
            MenuItem::Exit => "Exit",
        }
    }
}

#[derive(Debug, Default)]
pub struct MainMenuScene {
    selected: usize,
    exit: bool,
}

impl MainMenuScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }

    fn select_previous(&mut self) {
        self.selected = (self.selected + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }
}

impl Scene for MainMenuScene {
    fn init(&mut self, _ctx: &mut SimContext) -> Result<()> {
        self.exit = false;
        Ok(())
    }

    fn handle_events(&mut self, input: &TickInput, _ctx: &mut SimContext) -> Option<SceneId> {
        for &event in &input.events {
            match event {
                GameEvent::MoveUp | GameEvent::MoveLeft => self.select_previous(),
                GameEvent::MoveDown | GameEvent::MoveRight => self.select_next(),
                GameEvent::Validate => match self.selected() {
                    MenuItem::Tutorial => return Some(SceneId::Tutorial),
                    MenuItem::RandomGame => return Some(SceneId::RandomGame),
                    MenuItem::Exit => self.exit = true,
                },
                GameEvent::Quit => self.exit = true,
                _ => {}
            }
        }
        None
    }

    fn update(&mut self, _dt: Duration, _ctx: &SimContext) {}

    fn should_exit(&self) -> bool {
        self.exit
    }

    fn end(&mut self) {}

    fn input_mode(&self) -> InputMode {
        InputMode::Menu
    }

    fn hud(&self) -> Hud {
        Hud {
            menu: Some(MenuView {
                items: MenuItem::ALL.iter().map(|item| item.label().to_string()).collect(),
                selected: self.selected,
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn send(menu: &mut MainMenuScene, events: &[GameEvent]) -> Option<SceneId> {
        let input = TickInput::new(events.to_vec(), Vec2::ZERO);
        menu.handle_events(&input, &mut SimContext::default())
    }

    #[test]
    fn test_selection_wraps() {
        let mut menu = MainMenuScene::new();
        assert_eq!(menu.selected(), MenuItem::Tutorial);

        send(&mut menu, &[GameEvent::MoveUp]);
        assert_eq!(menu.selected(), MenuItem::Exit);

        send(&mut menu, &[GameEvent::MoveDown]);
        assert_eq!(menu.selected(), MenuItem::Tutorial);

        send(&mut menu, &[GameEvent::MoveRight, GameEvent::MoveRight]);
        assert_eq!(menu.selected(), MenuItem::Exit);

        send(&mut menu, &[GameEvent::MoveLeft]);
        assert_eq!(menu.selected(), MenuItem::RandomGame);
    }

    #[test]
    fn test_validate_picks_scene() {
        let mut menu = MainMenuScene::new();
        assert_eq!(send(&mut menu, &[GameEvent::Validate]), Some(SceneId::Tutorial));

        send(&mut menu, &[GameEvent::MoveDown]);
        assert_eq!(send(&mut menu, &[GameEvent::Validate]), Some(SceneId::RandomGame));
        assert!(!menu.should_exit());
    }

    #[test]
    fn test_exit_item_and_quit() {
        let mut menu = MainMenuScene::new();
        send(&mut menu, &[GameEvent::MoveUp]);
        assert_eq!(send(&mut menu, &[GameEvent::Validate]), None);
        assert!(menu.should_exit());

        menu.init(&mut SimContext::default()).unwrap();
        assert!(!menu.should_exit());
        send(&mut menu, &[GameEvent::Quit]);
        assert!(menu.should_exit());
    }

    #[test]
    fn test_hud_lists_items() {
        let mut menu = MainMenuScene::new();
        send(&mut menu, &[GameEvent::MoveDown]);
        let view = menu.hud().menu.unwrap();
        assert_eq!(view.items, vec!["Tutorial", "Random game", "Exit"]);
        assert_eq!(view.selected, 1);
    }
}
