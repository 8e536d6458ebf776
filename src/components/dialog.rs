use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::components::panel::centered;
use crate::context::UpdateContext;
use crate::layers::Layers;
use crate::layout::floating::clamp_floating_size;
use crate::layout::{FloatRect, LayerSize};
use crate::modal::ModalState;
use crate::surface::{Layer, Surface};
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// Two-button confirmation dialog meant to be used as a modal floor.
///
/// Choosing a button records the result, ends the modal session the dialog
/// is floor of, and detaches the dialog. The result stays readable through
/// the caller's `Layer` handle.
#[derive(Debug)]
pub struct DialogSurface {
    title: String,
    body: String,
    confirm_label: String,
    cancel_label: String,
    size: LayerSize,
    selected_confirm: bool,
    result: Option<ConfirmAction>,
}

impl DialogSurface {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            confirm_label: "[ OK ]".to_string(),
            cancel_label: "[ Cancel ]".to_string(),
            size: LayerSize::new(40, 8),
            selected_confirm: true,
            result: None,
        }
    }

    pub fn with_labels(mut self, confirm: &str, cancel: &str) -> Self {
        self.confirm_label = format!("[ {confirm} ]");
        self.cancel_label = format!("[ {cancel} ]");
        self
    }

    pub fn with_size(mut self, size: LayerSize) -> Self {
        self.size = clamp_floating_size(size);
        self
    }

    pub fn result(&self) -> Option<ConfirmAction> {
        self.result
    }

    pub fn selected(&self) -> ConfirmAction {
        if self.selected_confirm {
            ConfirmAction::Confirm
        } else {
            ConfirmAction::Cancel
        }
    }

    /// Attach the dialog centered in `container` and make it the modal floor.
    pub fn open(
        self,
        layers: &mut Layers,
        container: LayerSize,
        modal: impl FnOnce(Layer) -> ModalState,
    ) -> Layer {
        let position = centered(self.size, container);
        let layer = Layer::new(self);
        layer.set_position(position);
        layers.begin_modal(modal(layer.clone()));
        layer
    }

    /// Keyboard handling for hosts that route keys to the active dialog.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<ConfirmAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.selected_confirm = !self.selected_confirm;
                None
            }
            KeyCode::Left => {
                self.selected_confirm = false;
                None
            }
            KeyCode::Right => {
                self.selected_confirm = true;
                None
            }
            KeyCode::Enter => Some(self.choose(self.selected())),
            KeyCode::Esc => Some(self.choose(ConfirmAction::Cancel)),
            _ => None,
        }
    }

    fn choose(&mut self, action: ConfirmAction) -> ConfirmAction {
        self.result = Some(action);
        action
    }

    /// Local rectangles of the cancel and confirm buttons, right aligned on
    /// the last inner row.
    fn buttons(&self) -> Option<(FloatRect, FloatRect)> {
        if self.size.height < 4 {
            return None;
        }
        let y = self.size.height as i32 - 2;
        let cancel_w = self.cancel_label.chars().count() as i32;
        let confirm_w = self.confirm_label.chars().count() as i32;
        let confirm_x = self.size.width as i32 - 2 - confirm_w;
        let cancel_x = confirm_x - 1 - cancel_w;
        if cancel_x < 1 {
            return None;
        }
        Some((
            FloatRect {
                x: cancel_x,
                y,
                width: cancel_w as u16,
                height: 1,
            },
            FloatRect {
                x: confirm_x,
                y,
                width: confirm_w as u16,
                height: 1,
            },
        ))
    }
}

/// Detach a finished dialog and end the modal session it is floor of.
pub fn dismiss(layers: &mut Layers, dialog: &Layer) {
    if layers.modal().is_some_and(|modal| modal.floor() == dialog) {
        layers.clear_modal();
    }
    layers.remove_control(dialog);
}

impl Surface for DialogSurface {
    fn size(&self) -> LayerSize {
        self.size
    }

    fn set_size(&mut self, size: LayerSize) -> LayerSize {
        self.size = clamp_floating_size(size);
        self.size
    }

    fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = Rect::new(0, 0, self.size.width, self.size.height);
        frame.fill(
            area,
            " ",
            Style::default().bg(theme::dialog_bg()).fg(theme::dialog_fg()),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::accent()))
            .title(format!(" {} ", self.title));
        frame.render_widget(block, area);
        // Border, separator and button rows are reserved.
        let inner = Rect::new(
            2,
            1,
            self.size.width.saturating_sub(4),
            self.size.height.saturating_sub(4),
        );
        frame.render_widget(
            Paragraph::new(self.body.as_str())
                .alignment(Alignment::Left)
                .style(Style::default().fg(theme::dialog_fg()))
                .wrap(Wrap { trim: true }),
            inner,
        );

        let Some((cancel, confirm)) = self.buttons() else {
            return;
        };
        let separator_y = cancel.y - 1;
        if separator_y > 0 {
            let rule = "─".repeat(self.size.width.saturating_sub(2) as usize);
            frame.set_string(
                1,
                separator_y,
                &rule,
                Style::default().fg(theme::dialog_separator()),
            );
        }
        let selected = Style::default()
            .fg(theme::button_selected_fg())
            .bg(theme::button_selected_bg())
            .add_modifier(Modifier::BOLD);
        let unselected = Style::default().fg(theme::dialog_fg()).bg(theme::dialog_bg());
        let (cancel_style, confirm_style) = if self.selected_confirm {
            (unselected, selected)
        } else {
            (selected, unselected)
        };
        frame.set_string(cancel.x, cancel.y, &self.cancel_label, cancel_style);
        frame.set_string(confirm.x, confirm.y, &self.confirm_label, confirm_style);
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, layers: &mut Layers, _elapsed: Duration) {
        let (Some(layer), Some(pointer)) = (ctx.layer(), ctx.pointer()) else {
            return;
        };
        if !pointer.left_clicked() {
            return;
        }
        let Some((cancel, confirm)) = self.buttons() else {
            return;
        };
        let action = if confirm.contains(pointer.position) {
            ConfirmAction::Confirm
        } else if cancel.contains(pointer.position) {
            ConfirmAction::Cancel
        } else {
            return;
        };
        self.choose(action);
        tracing::debug!(layer = ?layer.id(), ?action, "dialog closed");
        dismiss(layers, layer);
    }
}
