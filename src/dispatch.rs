//! Event dispatcher: input events to commands, commands to session calls.
//!
//! Translation and application are separate steps. Keyboard and button input
//! both end up as [`Command`]s, and every command goes through
//! [`Dispatcher::apply`].

use crate::command::{Command, KeyBindings};
use crate::constants::window;
use crate::geometry::Viewport;
use crate::images::ImageProbe;
use crate::input::InputEvent;
use crate::layout::ButtonLayout;
use crate::session::Session;

/// Whether the session loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Maps input to commands and runs them against a session.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    bindings: KeyBindings,
    layout: ButtonLayout,
    max_image_box: (f64, f64),
}

impl Dispatcher {
    /// Dispatcher with the given key table and buttons for `label_count` labels.
    pub fn new(bindings: KeyBindings, label_count: u32) -> Self {
        Self {
            bindings,
            layout: ButtonLayout::new(label_count),
            max_image_box: window::MAX_IMAGE_BOX,
        }
    }

    /// Override the box the image is fitted into.
    pub fn with_max_image_box(mut self, max_image_box: (f64, f64)) -> Self {
        self.max_image_box = max_image_box;
        self
    }

    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Display placement of the session's current image.
    pub fn viewport<P: ImageProbe>(&self, session: &mut Session<P>) -> Option<Viewport> {
        match session.current_image_size() {
            Ok(size) => Some(Viewport::fit(size, self.max_image_box)),
            Err(e) => {
                log::warn!(
                    "Cannot read size of {:?}: {}",
                    session.current_image(),
                    e
                );
                None
            }
        }
    }

    /// Commands an event stands for, in the order they should run.
    ///
    /// A pointer release is checked against both the displayed image and the
    /// buttons, so it can produce a click and a button command.
    pub fn translate<P: ImageProbe>(
        &self,
        session: &mut Session<P>,
        event: InputEvent,
    ) -> Vec<Command> {
        match event {
            InputEvent::PointerReleased(position) => {
                let mut commands = Vec::new();

                if let Some(viewport) = self.viewport(session) {
                    if viewport.contains(position) {
                        commands.push(Command::RegisterClick(viewport.to_image(position)));
                    }
                }
                if let Some(command) = self.layout.hit_test(position) {
                    commands.push(command);
                }

                commands
            }
            InputEvent::KeyPressed(key) => match self.bindings.command_for_key(key) {
                Some(command) => vec![command],
                None => {
                    log::trace!("Unbound key {}", key);
                    Vec::new()
                }
            },
            InputEvent::CloseRequested => vec![Command::Quit],
        }
    }

    /// Run one command against the session.
    pub fn apply<P: ImageProbe>(&self, session: &mut Session<P>, command: Command) -> Flow {
        if let Command::AssignLabel(label) = command {
            if label >= session.label_count() {
                log::debug!(
                    "Ignoring label {} (only {} labels configured)",
                    label,
                    session.label_count()
                );
                return Flow::Continue;
            }
        }

        if command.updates_status() {
            session.set_status(command.name());
        }

        match command {
            Command::Clear => session.clear(),
            Command::AssignLabel(label) => {
                session.assign(label);
            }
            Command::Advance => {
                if let Err(e) = session.advance() {
                    log::error!("Failed to commit {:?}: {}", session.current_image(), e);
                    session.set_status(format!("Done&Next failed: {e}"));
                }
            }
            Command::Save => match session.save() {
                Ok(rows) => log::debug!("Save wrote {} rows", rows),
                Err(e) => {
                    log::error!("Failed to save to {:?}: {}", session.store().path(), e);
                    session.set_status(format!("Save failed: {e}"));
                }
            },
            Command::Quit => {
                log::info!("Quit requested");
                return Flow::Quit;
            }
            Command::RegisterClick(point) => session.register_click(point),
        }

        Flow::Continue
    }

    /// Translate and apply one event. Commands after a quit are not run.
    pub fn handle<P: ImageProbe>(&self, session: &mut Session<P>, event: InputEvent) -> Flow {
        for command in self.translate(session, event) {
            if self.apply(session, command) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Key;
    use crate::error::Result;
    use crate::geometry::{ImageSize, Point};
    use crate::images::ImageSet;
    use crate::store::{AnnotationTable, TableStore};
    use std::path::Path;

    fn session(label_count: u32) -> Session<impl ImageProbe> {
        Session::new(
            ImageSet::from_paths(["a.jpg", "b.jpg"]).unwrap(),
            TableStore::new("unused.csv"),
            AnnotationTable::new(),
            label_count,
            |_: &Path| -> Result<ImageSize> { Ok(ImageSize::new(640, 480)) },
        )
    }

    fn click(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerReleased(Point::new(x, y))
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::KeyPressed(name.parse().unwrap())
    }

    #[test]
    fn test_click_inside_image_registers() {
        let mut s = session(3);
        let d = Dispatcher::new(KeyBindings::default(), 3);

        assert_eq!(d.handle(&mut s, click(10.0, 10.0)), Flow::Continue);
        assert_eq!(s.pending_clicks().points(), &[Point::new(10.0, 10.0)]);

        // Outside the 640x480 image and not on a button
        d.handle(&mut s, click(700.0, 600.0));
        assert_eq!(s.pending_clicks().len(), 1);
        assert_eq!(s.status(), "Started");
    }

    #[test]
    fn test_scaled_image_click_maps_to_pixels() {
        let mut s = Session::new(
            ImageSet::from_paths(["big.png"]).unwrap(),
            TableStore::new("unused.csv"),
            AnnotationTable::new(),
            1,
            |_: &Path| -> Result<ImageSize> { Ok(ImageSize::new(1600, 1200)) },
        );
        let d = Dispatcher::new(KeyBindings::default(), 1);

        d.handle(&mut s, click(400.0, 300.0));
        assert_eq!(s.pending_clicks().points(), &[Point::new(800.0, 600.0)]);
    }

    #[test]
    fn test_keyboard_commit_cycle() {
        let mut s = session(3);
        let d = Dispatcher::new(KeyBindings::default(), 3);

        d.handle(&mut s, click(10.0, 10.0));
        d.handle(&mut s, click(50.0, 60.0));
        d.handle(&mut s, key("1"));
        assert_eq!(s.status(), "Assign 1");
        assert_eq!(s.pending_assignments().len(), 1);

        d.handle(&mut s, key("space"));
        assert_eq!(s.status(), "Done&Next");
        assert_eq!(s.output().len(), 1);
        assert_eq!(s.output()[0].label, 1);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_out_of_range_label_is_dropped() {
        let mut s = session(3);
        let d = Dispatcher::new(KeyBindings::default(), 3);

        d.handle(&mut s, click(10.0, 10.0));
        d.handle(&mut s, click(50.0, 60.0));
        d.handle(&mut s, key("5"));

        assert!(s.pending_assignments().is_empty());
        assert_eq!(s.pending_clicks().len(), 2);
        assert_eq!(s.status(), "Started");
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut s = session(3);
        let d = Dispatcher::new(KeyBindings::default(), 3);

        assert!(d.translate(&mut s, key("q")).is_empty());
        assert_eq!(d.handle(&mut s, key("q")), Flow::Continue);
        assert_eq!(s.status(), "Started");
    }

    #[test]
    fn test_buttons_trigger_commands() {
        let mut s = session(3);
        let d = Dispatcher::new(KeyBindings::default(), 3);

        d.handle(&mut s, click(10.0, 10.0));
        d.handle(&mut s, click(50.0, 60.0));
        // "Assign 2" button at (1020, 160)
        d.handle(&mut s, click(1025.0, 165.0));
        assert_eq!(s.pending_assignments()[0].label, 2);
        assert_eq!(s.status(), "Assign 2");

        // "Done&Next" button
        d.handle(&mut s, click(980.0, 55.0));
        assert_eq!(s.output().len(), 1);
        assert_eq!(s.current_index(), 1);

        // "Clear" button
        d.handle(&mut s, click(870.0, 55.0));
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.status(), "Clear");
    }

    #[test]
    fn test_release_can_hit_image_and_button() {
        let mut s = Session::new(
            ImageSet::from_paths(["wide.png"]).unwrap(),
            TableStore::new("unused.csv"),
            AnnotationTable::new(),
            1,
            |_: &Path| -> Result<ImageSize> { Ok(ImageSize::new(2000, 200)) },
        );
        // Image box wide enough to reach under the buttons
        let d = Dispatcher::new(KeyBindings::default(), 1).with_max_image_box((2000.0, 1000.0));

        let commands = d.translate(&mut s, click(870.0, 55.0));
        assert_eq!(
            commands,
            [
                Command::RegisterClick(Point::new(870.0, 55.0)),
                Command::Clear
            ]
        );
    }

    #[test]
    fn test_close_quits_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let mut s = Session::new(
            ImageSet::from_paths(["a.jpg"]).unwrap(),
            TableStore::new(&out),
            AnnotationTable::new(),
            1,
            |_: &Path| -> Result<ImageSize> { Ok(ImageSize::new(100, 100)) },
        );
        let d = Dispatcher::new(KeyBindings::default(), 1);

        d.handle(&mut s, click(10.0, 10.0));
        d.handle(&mut s, click(20.0, 20.0));
        d.handle(&mut s, key("0"));
        d.handle(&mut s, key("space"));

        assert_eq!(d.handle(&mut s, InputEvent::CloseRequested), Flow::Quit);
        assert!(!out.exists());
    }

    #[test]
    fn test_save_failure_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the output file
        let mut s = Session::new(
            ImageSet::from_paths(["a.jpg"]).unwrap(),
            TableStore::new(dir.path()),
            AnnotationTable::new(),
            1,
            |_: &Path| -> Result<ImageSize> { Ok(ImageSize::new(100, 100)) },
        );
        let d = Dispatcher::new(KeyBindings::default(), 1);

        d.handle(&mut s, click(10.0, 10.0));
        d.handle(&mut s, click(20.0, 20.0));
        d.handle(&mut s, key("0"));
        d.handle(&mut s, key("space"));
        d.handle(&mut s, key("escape"));

        assert!(s.status().starts_with("Save failed"));
        assert_eq!(s.output().len(), 1);
    }

    #[test]
    fn test_viewport_unavailable_skips_click() {
        let mut s = Session::new(
            ImageSet::from_paths(["missing.png"]).unwrap(),
            TableStore::new("unused.csv"),
            AnnotationTable::new(),
            1,
            |_: &Path| -> Result<ImageSize> {
                Err(crate::error::LabelError::Geometry {
                    width: 0,
                    height: 0,
                })
            },
        );
        let d = Dispatcher::new(KeyBindings::default(), 1);

        assert!(d.viewport(&mut s).is_none());
        d.handle(&mut s, click(10.0, 10.0));
        assert!(s.pending_clicks().is_empty());

        // Buttons still work
        d.handle(&mut s, click(870.0, 55.0));
        assert_eq!(s.status(), "Clear");
    }
}
