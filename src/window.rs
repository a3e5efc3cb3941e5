use {
    super::*,
    crate::{
        render::Frame,
        source::{Clock, Source},
    },
    crossterm::{
        QueueableCommand, cursor,
        terminal::{self, ClearType},
    },
    std::io::{self, Write},
    tracing::{debug, info},
};

/// tracks what is on screen, so that each frame overwrites the last in place.
#[derive(Debug, Default)]
pub struct Screen {
    /// how many lines the previous frame occupied.
    last: usize,
}

impl<C: Clock, S: Source> App<C, S> {
    /// runs the display until the process is terminated.
    pub fn run(mut self) -> Result<(), crate::Error> {
        let mut stdout = io::stdout();

        self.sentinel.observe();
        Screen::setup(&mut stdout)?;
        info!(interval = ?self.config.interval, "started");

        loop {
            self.sleep();
            self.tick(&mut stdout, Self::columns())?;
        }
    }

    /// samples the host, and draws one frame for a terminal `cols` columns wide.
    pub fn tick(&mut self, out: &mut impl Write, cols: u16) -> io::Result<()> {
        let Self {
            sentinel,
            screen,
            config,
        } = self;

        let Some(recording) = sentinel.observe() else {
            return Ok(());
        };
        let frame = Frame::render(&recording, sentinel.trends(), config, cols);
        screen.draw(&frame, out)
    }

    fn sleep(&self) {
        std::thread::sleep(self.config.interval);
    }

    /// returns the width of the terminal, or 80 columns if it cannot be measured.
    fn columns() -> u16 {
        const FALLBACK: u16 = 80;

        match terminal::size() {
            Ok((cols, _)) if cols > 0 => cols,
            Ok(_) => FALLBACK,
            Err(error) => {
                debug!(%error, "could not measure terminal");
                FALLBACK
            }
        }
    }
}

// === impl Screen ===

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// hides the cursor, and clears the screen.
    pub fn setup(out: &mut impl Write) -> io::Result<()> {
        out.queue(cursor::Hide)?
            .queue(terminal::Clear(ClearType::All))?
            .queue(cursor::MoveTo(0, 0))?
            .flush()
    }

    /// writes `frame` over the previous frame, in a single write.
    ///
    /// the cursor returns to the top of the previous frame, each line is cleared before it is
    /// drawn, and anything below the new frame is cleared, so a shorter frame leaves nothing
    /// behind.
    pub fn draw(&mut self, frame: &Frame, out: &mut impl Write) -> io::Result<()> {
        let Self { last } = self;

        let mut buf = Vec::new();
        if *last > 0 {
            let up = u16::try_from(*last).unwrap_or(u16::MAX);
            buf.queue(cursor::MoveUp(up))?
                .queue(cursor::MoveToColumn(0))?;
        }
        for line in frame.lines() {
            buf.queue(terminal::Clear(ClearType::UntilNewLine))?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        buf.queue(terminal::Clear(ClearType::FromCursorDown))?;

        out.write_all(&buf)?;
        out.flush()?;

        *last = frame.len();
        Ok(())
    }

    /// how many lines the last frame occupied.
    pub fn last(&self) -> usize {
        self.last
    }
}
