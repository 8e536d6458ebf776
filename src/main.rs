use std::io;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use indoc::indoc;
use tracing::Level;

use term_layers::components::{
    BackdropSurface, ConfirmAction, DialogSurface, LogHandle, LogViewSurface, PanelSurface,
    dismiss,
};
use term_layers::constants::{DEFAULT_FPS, DEFAULT_SHADOW_WIDTH};
use term_layers::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_layers::event_loop::ControlFlow;
use term_layers::runner::{LayerApp, run_layer_app};
use term_layers::{ConfigError, Layer, LayerPos, LayerSize, LayerStack, StackConfig, tracing_sub};

const HELP: &str = indoc! {"
    Drag a panel by its title bar.
    Click a panel to raise it.

    n  new panel
    m  open a modal dialog
    l  toggle the log view
    q  quit
"};

#[derive(Parser, Debug)]
#[command(
    name = "term-layers",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating layer stack demo"
)]
struct Cli {
    /// Target frame rate.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Drop shadow width in columns; 0 disables shadows.
    #[arg(long = "shadow-width", value_name = "COLUMNS", default_value_t = DEFAULT_SHADOW_WIDTH)]
    shadow_width: u16,

    /// Do not dim content below modal dialogs.
    #[arg(long = "no-lightbox")]
    no_lightbox: bool,

    /// Let the pointer reach layers below a modal dialog.
    #[arg(long = "fallthrough")]
    fallthrough: bool,

    /// Number of panels to open at start.
    #[arg(short = 'p', long = "panels", value_name = "COUNT", default_value_t = 3)]
    panels: usize,

    /// Most verbose log level shown in the log view.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: Level,
}

impl TryFrom<&Cli> for StackConfig {
    type Error = ConfigError;

    fn try_from(args: &Cli) -> Result<Self, Self::Error> {
        Ok(StackConfig::default()
            .with_fps(args.fps)?
            .with_shadow_width(args.shadow_width)?
            .with_lightbox(!args.no_lightbox)
            .with_mouse_fallthrough(args.fallthrough))
    }
}

fn main() -> io::Result<()> {
    let args = Cli::parse();
    let config = StackConfig::try_from(&args)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let log = LogHandle::default();
    tracing_sub::init(args.log_level, Some(log.clone()));

    let mut app = DemoApp::new(config, args.panels, log);
    let mut input = ConsoleInputDriver::new();
    let mut output = ConsoleOutputDriver::new()?;
    run_layer_app(&mut input, &mut output, &mut app, config.frame_interval)
}

struct DemoApp {
    stack: LayerStack,
    config: StackConfig,
    log_view: Layer,
    exit_dialog: Option<Layer>,
    panels_opened: usize,
    quit: bool,
}

impl DemoApp {
    fn new(config: StackConfig, panels: usize, log: LogHandle) -> Self {
        let mut stack = LayerStack::from_config(&config);
        stack.set_background(BackdropSurface::new().with_status("term-layers"));
        let help = Layer::new(
            PanelSurface::new("help", LayerSize::new(30, 10)).with_body(HELP.lines()),
        );
        stack.add_control(&help, LayerPos::new(2, 1));
        let log_view = Layer::new(LogViewSurface::new(log, LayerSize::new(60, 8)));
        let mut app = Self {
            stack,
            config,
            log_view,
            exit_dialog: None,
            panels_opened: 0,
            quit: false,
        };
        for _ in 0..panels {
            app.open_panel();
        }
        app
    }

    fn open_panel(&mut self) {
        self.panels_opened += 1;
        let n = self.panels_opened as i32;
        let panel = Layer::new(
            PanelSurface::new(format!("panel {n}"), LayerSize::new(28, 8))
                .with_body([format!("This is panel {n}."), "Drag me around.".to_string()]),
        );
        self.stack
            .add_control(&panel, LayerPos::new(34 + (n % 6) * 4, 2 + (n % 6) * 2));
        tracing::info!(panel = n, "panel opened");
    }

    fn open_dialog(&mut self, title: &str, body: &str) -> Layer {
        let container = self.stack.size();
        let config = self.config;
        DialogSurface::new(title, body).open(self.stack.layers_mut(), container, |floor| {
            config.modal_for(floor)
        })
    }

    fn toggle_log_view(&mut self) {
        if self.log_view.is_attached() {
            self.stack.remove_control(&self.log_view);
        } else {
            let height = self.stack.size().height as i32;
            let position = LayerPos::new(2, (height - 10).max(0));
            self.stack.add_control(&self.log_view, position);
        }
    }

    /// Modal dialog currently holding the floor, if any.
    fn active_dialog(&self) -> Option<Layer> {
        self.stack
            .layers()
            .active_modal()
            .map(|modal| modal.floor().clone())
            .filter(|floor| floor.borrow_as::<DialogSurface>().is_some())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ControlFlow::Quit;
        }
        if let Some(dialog) = self.active_dialog() {
            let action = dialog
                .borrow_as::<DialogSurface>()
                .and_then(|mut surface| surface.handle_key(key));
            if action.is_some() {
                dismiss(self.stack.layers_mut(), &dialog);
            }
            return ControlFlow::Continue;
        }
        match key.code {
            KeyCode::Char('q') => {
                let dialog = self.open_dialog("Quit", "Leave the demo?");
                self.exit_dialog = Some(dialog);
            }
            KeyCode::Char('n') => self.open_panel(),
            KeyCode::Char('m') => {
                self.open_dialog(
                    "Modal",
                    "Layers below this dialog ignore the pointer until it closes.",
                );
            }
            KeyCode::Char('l') => self.toggle_log_view(),
            _ => {}
        }
        ControlFlow::Continue
    }
}

impl LayerApp for DemoApp {
    fn stack(&mut self) -> &mut LayerStack {
        &mut self.stack
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => ControlFlow::Continue,
        }
    }

    fn after_update(&mut self) -> ControlFlow {
        if let Some(dialog) = self.exit_dialog.as_ref() {
            let result = dialog
                .borrow_as::<DialogSurface>()
                .and_then(|surface| surface.result());
            match result {
                Some(ConfirmAction::Confirm) => self.quit = true,
                Some(ConfirmAction::Cancel) => self.exit_dialog = None,
                None => {}
            }
        }
        if self.quit {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        }
    }
}
