use crate::audio::{AudioBackend, CpalBackend, SilentBackend};
use crate::card::PlayerCard;
use crate::config::PlayerConfig;
use crate::demo::{Demo, Paper};
use crate::visual::Framebuffer;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Commands read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Toggle,
    Quit,
}

impl ShellCommand {
    /// Empty line or "p" toggles, "q" quits.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "" | "p" | "play" | "stop" | "toggle" => Some(ShellCommand::Toggle),
            "q" | "quit" | "exit" => Some(ShellCommand::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NativeOptions {
    pub config: PlayerConfig,
    pub demo: Demo,
    pub related_paper: Option<Paper>,
    /// Print an ASCII preview every this many frames; 0 disables it.
    pub preview_every: u64,
    pub preview_cols: usize,
    pub preview_rows: usize,
    pub frame_rate: f64,
    pub mute: bool,
    pub device_hint: Option<String>,
    pub autoplay: bool,
}

impl NativeOptions {
    pub fn new(config: PlayerConfig, demo: Demo) -> Self {
        Self {
            config,
            demo,
            related_paper: None,
            preview_every: 30,
            preview_cols: 75,
            preview_rows: 8,
            frame_rate: 60.0,
            mute: false,
            device_hint: None,
            autoplay: false,
        }
    }

    /// Card heading printed before playback: title, description, related
    /// paper and MIDI source.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![self.demo.title.clone()];
        if !self.demo.description.is_empty() {
            lines.push(self.demo.description.clone());
        }
        if let Some(paper) = &self.related_paper {
            lines.push(format!("Related: {}", paper.short_title(15)));
        }
        if let Some(url) = &self.demo.midi_url {
            lines.push(format!("MIDI: {}", url));
        }
        lines
    }
}

fn spawn_stdin_reader() -> Receiver<ShellCommand> {
    let (tx, rx) = channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match ShellCommand::parse(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        return;
                    }
                }
                None => println!("unknown command {:?} (enter: play/stop, q: quit)", line),
            }
        }
        let _ = tx.send(ShellCommand::Quit);
    });
    rx
}

/// Run one demo card until the user quits.
pub fn start(options: NativeOptions) -> anyhow::Result<()> {
    options.config.validate()?;
    let commands = spawn_stdin_reader();
    if options.mute {
        run_card(SilentBackend::new(), &options, commands)
    } else {
        let backend = match &options.device_hint {
            Some(hint) => CpalBackend::with_device_hint(hint.clone()),
            None => CpalBackend::new(),
        };
        run_card(backend, &options, commands)
    }
}

fn run_card<B: AudioBackend>(
    backend: B,
    options: &NativeOptions,
    commands: Receiver<ShellCommand>,
) -> anyhow::Result<()> {
    let vis = &options.config.visualizer;
    let surface = Framebuffer::new(vis.width.round() as usize, vis.height.round() as usize);
    let mut card = PlayerCard::new(
        options.demo.id.clone(),
        backend,
        surface,
        options.demo.color,
        &options.config,
    );

    for line in options.header_lines() {
        println!("{}", line);
    }
    println!("enter: play/stop, q: quit");

    if options.autoplay {
        report_toggle(card.toggle());
    }

    let frame_interval = Duration::from_secs_f64(1.0 / options.frame_rate.max(1.0));
    let mut next_tick = Instant::now();
    loop {
        match commands.try_recv() {
            Ok(ShellCommand::Toggle) => report_toggle(card.toggle()),
            Ok(ShellCommand::Quit) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }

        if let Some(id) = card.pending_frame() {
            if card.on_frame(id) {
                print_preview(&card, options);
            }
        }

        next_tick += frame_interval;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            // fell behind; skip ahead instead of bursting frames
            next_tick = now;
        }
    }

    card.unmount();
    Ok(())
}

fn report_toggle(result: Result<bool, crate::audio::AudioError>) {
    match result {
        Ok(true) => println!("playing"),
        Ok(false) => println!("stopped"),
        Err(err) => log::error!("could not start playback: {}", err),
    }
}

fn print_preview<B: AudioBackend>(card: &PlayerCard<B, Framebuffer>, options: &NativeOptions) {
    if options.preview_every == 0 {
        return;
    }
    let frames = card.visualizer().frames();
    if frames % options.preview_every != 0 {
        return;
    }
    if let Some(surface) = card.surface() {
        print!(
            "{}",
            surface.to_ascii(options.preview_cols, options.preview_rows)
        );
        println!("offset {}", card.visualizer().offset());
    }
}

#[cfg(test)]
mod tests {
    use super::{NativeOptions, ShellCommand};
    use crate::config::PlayerConfig;
    use crate::demo::Catalog;

    #[test]
    fn header_names_the_related_paper() {
        let catalog = Catalog::builtin().unwrap();
        let demo = catalog.find("demo2").unwrap().clone();
        let mut options = NativeOptions::new(PlayerConfig::default(), demo.clone());
        options.related_paper = catalog.related_paper(&demo).cloned();

        let lines = options.header_lines();
        assert_eq!(lines[0], demo.title);
        assert!(lines.contains(&"Related: From Generality...".to_string()));
        assert!(lines.contains(&"MIDI: assets/chopin.mid".to_string()));
    }

    #[test]
    fn header_skips_missing_parts() {
        let demo = crate::demo::Demo {
            id: "x".into(),
            title: "Untitled".into(),
            description: String::new(),
            related_paper_id: None,
            midi_url: None,
            color: crate::demo::DEFAULT_ACCENT,
        };
        let options = NativeOptions::new(PlayerConfig::default(), demo);
        assert_eq!(options.header_lines(), vec!["Untitled".to_string()]);
    }

    #[test]
    fn parses_commands() {
        assert_eq!(ShellCommand::parse(""), Some(ShellCommand::Toggle));
        assert_eq!(ShellCommand::parse(" P "), Some(ShellCommand::Toggle));
        assert_eq!(ShellCommand::parse("quit"), Some(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("rewind"), None);
    }
}
