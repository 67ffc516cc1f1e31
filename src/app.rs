//! Session driver loop.
//!
//! Each tick polls the input source, dispatches the events in arrival order
//! and draws one frame. The loop ends on quit; nothing is saved implicitly.

use std::time::{Duration, Instant};

use crate::dispatch::{Dispatcher, Flow};
use crate::error::Result;
use crate::images::ImageProbe;
use crate::input::InputSource;
use crate::render::{Frame, Renderer};
use crate::session::Session;

/// A session wired to an input source and a renderer.
pub struct App<P, I, R> {
    session: Session<P>,
    dispatcher: Dispatcher,
    input: I,
    renderer: R,
    tick_interval: Option<Duration>,
}

impl<P, I, R> App<P, I, R>
where
    P: ImageProbe,
    I: InputSource,
    R: Renderer,
{
    pub fn new(session: Session<P>, dispatcher: Dispatcher, input: I, renderer: R) -> Self {
        Self {
            session,
            dispatcher,
            input,
            renderer,
            tick_interval: None,
        }
    }

    /// Wait so that ticks start at most once per `interval`.
    pub fn with_tick_interval(mut self, interval: Option<Duration>) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Run ticks until the input asks to quit.
    pub fn run(&mut self) -> Result<()> {
        self.draw()?;

        loop {
            let started = Instant::now();

            if self.tick()? == Flow::Quit {
                break;
            }

            if let Some(interval) = self.tick_interval {
                let elapsed = started.elapsed();
                if elapsed < interval {
                    std::thread::sleep(interval - elapsed);
                }
            }
        }

        log::info!(
            "Session ended with {} committed annotations (status: {})",
            self.session.output().len(),
            self.session.status()
        );
        Ok(())
    }

    /// Process one batch of events and redraw.
    pub fn tick(&mut self) -> Result<Flow> {
        for event in self.input.poll_events()? {
            if self.dispatcher.handle(&mut self.session, event) == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        self.draw()?;
        Ok(Flow::Continue)
    }

    fn draw(&mut self) -> Result<()> {
        let viewport = self.dispatcher.viewport(&mut self.session);
        let frame = Frame::capture(&self.session, self.dispatcher.layout(), viewport);
        self.renderer.draw(&frame)
    }

    pub fn session(&self) -> &Session<P> {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (Session<P>, R) {
        (self.session, self.renderer)
    }
}
