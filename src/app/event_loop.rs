use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::text::Text;

use crate::app::input::{EventSource, handle_event};
use crate::app::{Disposition, Pager, PagerError, update};
use crate::markup;
use crate::ui::viewport::Viewport;

impl Pager {
    /// Render the current scroll position and return the padded body.
    ///
    /// The viewport height is recomputed from the terminal size first, so
    /// a resized terminal takes effect on the next render.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Markup`] when the body is not valid console
    /// markup (nothing is drawn in that case) and [`PagerError::Terminal`]
    /// when the terminal cannot be queried or drawn to.
    pub fn render<B>(&mut self, terminal: &mut Terminal<B>) -> Result<String, PagerError>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let size = terminal.size().map_err(PagerError::terminal)?;
        self.model
            .viewport
            .resize(Viewport::height_for_rows(size.height));

        let body = crate::ui::compose_body(&self.model.document, &self.model.viewport);
        let text: Text<'static> = if self.model.markup_enabled {
            markup::parse(&body)?
        } else {
            markup::plain(&body)
        };

        let model = &self.model;
        terminal
            .draw(|frame| crate::ui::render(model, text, frame))
            .map_err(PagerError::terminal)?;
        tracing::trace!(
            offset = self.model.viewport.offset(),
            height = self.model.viewport.height(),
            "rendered frame"
        );

        self.model.set_last_body(body.clone());
        Ok(body)
    }

    /// Run the interaction loop until the user cancels or asks for a reload.
    ///
    /// Renders once, then handles one event at a time. Ignored events do
    /// not re-render. On exit the screen is cleared.
    ///
    /// # Errors
    ///
    /// Fails if rendering fails or the event source reports an error.
    pub fn run<B, E>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<Disposition, PagerError>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
        E: EventSource + ?Sized,
    {
        self.render(terminal)?;

        loop {
            let Some(msg) = handle_event(events.next_event()?) else {
                continue;
            };
            tracing::debug!(?msg, offset = self.model.viewport.offset(), "pager message");
            self.model = update(std::mem::take(&mut self.model), msg);

            match self.model.disposition {
                Disposition::Continue => {
                    self.render(terminal)?;
                }
                disposition => {
                    terminal.clear().map_err(PagerError::terminal)?;
                    return Ok(disposition);
                }
            }
        }
    }
}
