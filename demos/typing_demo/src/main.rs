use std::cell::Cell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::thread;

use settle_core::*;
use settle_devtools::Hud;

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog.";
const TYPO_AT: usize = 16;
const KEY_INTERVAL: Duration = Duration::from_millis(70);

/// Timer host for a plain sleep loop: the loop ticks while `armed` is set.
#[derive(Clone, Default)]
struct LoopTimers {
    armed: Rc<Cell<bool>>,
}

impl TimerHost for LoopTimers {
    fn start_repeating(&mut self, _period: Duration) -> Dispose {
        self.armed.set(true);
        let armed = self.armed.clone();
        Dispose::new(move || armed.set(false))
    }
}

/// In-memory document painted to the terminal with 24-bit color.
struct Terminal {
    text: String,
    version: u64,
    dark: bool,
    ink: Color,
    background: Color,
    marks: Vec<(TextSpan, SettleStyle)>,
    out: std::io::Stdout,
}

impl Terminal {
    fn new(dark: bool) -> Self {
        let (ink, background) = if dark {
            (Color::from_hex("#E6E6E6"), Color::from_hex("#1E1E1E"))
        } else {
            (Color::from_hex("#202020"), Color::from_hex("#FAFAFA"))
        };
        Self {
            text: String::new(),
            version: 0,
            dark,
            ink,
            background,
            marks: Vec::new(),
            out: std::io::stdout(),
        }
    }

    fn bounds(&self) -> DocumentBounds {
        DocumentBounds {
            doc_len: self.text.len(),
            version: self.version,
        }
    }

    fn type_char(&mut self, c: char) -> DocChange {
        let at = self.text.len();
        self.text.push(c);
        self.version += 1;
        DocChange::insertion(self.version, self.text.len(), at, c.len_utf8())
    }

    fn backspace(&mut self) -> Option<DocChange> {
        let c = self.text.pop()?;
        self.version += 1;
        let at = self.text.len();
        Some(DocChange::deletion(
            self.version,
            self.text.len(),
            at,
            at + c.len_utf8(),
        ))
    }

    fn color_at(&self, pos: usize) -> Color {
        // Last mark wins where spans overlap.
        let style = self
            .marks
            .iter()
            .rev()
            .find(|(s, _)| s.from() <= pos && pos < s.to())
            .map(|(_, style)| style);
        match style {
            Some(style) => self.ink.settled(style).over(self.background),
            None => self.ink,
        }
    }

    fn draw(&mut self, hud: Option<String>) -> std::io::Result<()> {
        let bg = self.background;
        let mut line = format!("\r\x1b[48;2;{};{};{}m", bg.0, bg.1, bg.2);
        for (pos, c) in self.text.char_indices() {
            let fg = self.color_at(pos);
            line.push_str(&format!("\x1b[38;2;{};{};{}m{c}", fg.0, fg.1, fg.2));
        }
        line.push_str("\x1b[0m\x1b[K");
        if let Some(hud) = hud {
            line.push_str(&format!("   \x1b[2m{hud}\x1b[0m"));
        }
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }
}

impl PaintSurface for Terminal {
    fn paint(&mut self, span: TextSpan, style: &SettleStyle) -> Result<(), PaintError> {
        if !span.fits(self.text.len()) {
            return Err(PaintError::OutOfBounds {
                span,
                doc_len: self.text.len(),
            });
        }
        self.marks.push((span, *style));
        Ok(())
    }

    fn request_repaint(&mut self) {}
}

impl ThemeQuery for Terminal {
    fn is_dark_theme(&self) -> bool {
        self.dark
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let dark = std::env::args().any(|a| a == "--dark");
    let show_hud = std::env::args().any(|a| a == "--hud");

    let mut store: HashMap<String, String> = HashMap::new();
    Settings::new(1.5, 0.6)?.save(&mut store)?;
    let settings = Settings::load(&store);
    log::info!("typing demo: {}", settings.to_json()?);

    let timers = LoopTimers::default();
    let armed = timers.armed.clone();
    let mut driver = Driver::new(settings, SystemClock, timers);
    let mut term = Terminal::new(dark);
    let mut hud = Hud::new();
    hud.enabled = show_hud;

    // Type the sentence with one typo that gets backspaced.
    let mut keys: Vec<Option<char>> = Vec::new();
    for (i, c) in SENTENCE.chars().enumerate() {
        if i == TYPO_AT {
            keys.extend([Some('x'), Some('z'), None, None]);
        }
        keys.push(Some(c));
    }
    let mut keys = keys.into_iter();

    let mut next_key = Instant::now();
    let mut typing = true;
    while typing || armed.get() {
        let now = Instant::now();
        if typing && now >= next_key {
            match keys.next() {
                Some(Some(c)) => {
                    let change = term.type_char(c);
                    driver.on_change(&change);
                }
                Some(None) => {
                    if let Some(change) = term.backspace() {
                        driver.on_change(&change);
                    }
                }
                None => typing = false,
            }
            next_key = now + KEY_INTERVAL;
        }

        if armed.get() {
            term.marks.clear();
            let bounds = term.bounds();
            let report = driver.tick(&mut term, bounds);
            hud.record(&report);
        }
        term.draw(hud.overlay())?;
        thread::sleep(FRAME_PERIOD);
    }

    driver.dispose();
    println!();
    log::info!("typing demo: {}", hud.line());
    Ok(())
}
