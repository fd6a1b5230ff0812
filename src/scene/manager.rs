//! Scene manager
//!
//! Scenes are stored by id and reused across activations; only the per-run
//! state allocated in `init` is rebuilt on every switch.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, error, info, warn};

use super::{Scene, SceneId};
use crate::error::{Result, SimError};
use crate::input::{InputMode, TickInput};
use crate::render::{Drawable, Hud};
use crate::sim::SimContext;

pub struct SceneManager {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
    current: SceneId,
    initialized: bool,
    /// Transition requested this tick, applied at the tick boundary
    pending: Option<SceneId>,
}

impl SceneManager {
    /// Empty manager whose first active scene will be `initial`
    pub fn new(initial: SceneId) -> Self {
        Self {
            scenes: HashMap::new(),
            current: initial,
            initialized: false,
            pending: None,
        }
    }

    pub fn register<T>(&mut self, id: SceneId, scene: T)
    where
        T: Scene + 'static,
    {
        if self.scenes.insert(id, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", id);
        }
    }

    /// Initialise the initial scene
    pub fn start(&mut self, ctx: &mut SimContext) -> Result<()> {
        let id = self.current;
        debug!("Starting scene manager with initial scene: {:?}", id);
        let scene = self.scenes.get_mut(&id).ok_or(SimError::UnknownScene(id))?;
        scene.init(ctx)?;
        self.initialized = true;
        Ok(())
    }

    pub fn current(&self) -> SceneId {
        self.current
    }

    pub fn pending(&self) -> Option<SceneId> {
        self.pending
    }

    /// Forward this tick's events to the active scene
    pub fn handle_events(&mut self, input: &TickInput, ctx: &mut SimContext) {
        let request = self
            .active_mut()
            .and_then(|scene| scene.handle_events(input, ctx));
        if let Some(next) = request {
            if let Some(previous) = self.pending.replace(next) {
                debug!("Transition to {:?} superseded by {:?}", previous, next);
            }
            debug!("Scene {:?} requested transition to {:?}", self.current, next);
        }
    }

    pub fn update(&mut self, dt: Duration, ctx: &SimContext) {
        if let Some(scene) = self.active_mut() {
            scene.update(dt, ctx);
        }
    }

    /// Apply the pending transition, if any.
    ///
    /// Called once per tick after `update`.
    pub fn process_transitions(&mut self, ctx: &mut SimContext) -> Result<()> {
        match self.pending.take() {
            Some(next) => self.swap_scene(next, ctx),
            None => Ok(()),
        }
    }

    /// End the active scene, then init `next`.
    ///
    /// If `next` fails to initialise the main menu is brought up instead and
    /// the error is returned.
    pub fn swap_scene(&mut self, next: SceneId, ctx: &mut SimContext) -> Result<()> {
        if !self.scenes.contains_key(&next) {
            return Err(SimError::UnknownScene(next));
        }

        let previous = self.current;
        if let Some(scene) = self.active_mut() {
            scene.end();
        }
        self.initialized = false;
        self.current = next;
        ctx.paused = false;

        let result = match self.scenes.get_mut(&next) {
            Some(scene) => scene.init(ctx),
            None => Err(SimError::UnknownScene(next)),
        };

        match result {
            Ok(()) => {
                self.initialized = true;
                info!("Scene switched: {:?} -> {:?}", previous, next);
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialise scene {:?}: {}", next, e);
                if next != SceneId::MainMenu {
                    self.current = SceneId::MainMenu;
                    if let Some(menu) = self.scenes.get_mut(&SceneId::MainMenu) {
                        match menu.init(ctx) {
                            Ok(()) => self.initialized = true,
                            Err(menu_err) => error!("Main menu failed to initialise: {}", menu_err),
                        }
                    }
                }
                Err(e)
            }
        }
    }

    pub fn should_exit(&self) -> bool {
        self.active().is_some_and(|scene| scene.should_exit())
    }

    pub fn input_mode(&self) -> InputMode {
        self.active()
            .map(|scene| scene.input_mode())
            .unwrap_or_default()
    }

    pub fn render(&self, out: &mut Vec<Drawable>) {
        if let Some(scene) = self.active() {
            scene.render(out);
        }
    }

    pub fn hud(&self) -> Hud {
        self.active().map(|scene| scene.hud()).unwrap_or_default()
    }

    fn active(&self) -> Option<&dyn Scene> {
        if !self.initialized {
            return None;
        }
        self.scenes.get(&self.current).map(|scene| &**scene)
    }

    fn active_mut(&mut self) -> Option<&mut Box<dyn Scene>> {
        if !self.initialized {
            return None;
        }
        self.scenes.get_mut(&self.current)
    }
}
