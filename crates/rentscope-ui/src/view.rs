use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use rentscope_core::{
    CrawlOutput, PredictionDisplay, PredictionOutput, RenderError, TableRow, TriggerAppearance,
};

/// What is currently visible on the page
#[derive(Debug, Clone, PartialEq)]
pub struct Widgets {
    pub predict_result: String,
    pub crawl_trigger: TriggerAppearance,
    pub loading_visible: bool,
    pub rows: Vec<TableRow>,
    pub result_area_visible: bool,
    pub alerts: usize,
}

impl Default for Widgets {
    fn default() -> Self {
        Self {
            predict_result: String::new(),
            crawl_trigger: TriggerAppearance::idle(),
            loading_visible: false,
            rows: Vec::new(),
            result_area_visible: false,
            alerts: 0,
        }
    }
}

struct Inner<W> {
    out: W,
    widgets: Widgets,
}

/// Line-oriented renderer standing in for the page DOM
pub struct TerminalView<W: Write + Send> {
    inner: Mutex<Inner<W>>,
    color: bool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                widgets: Widgets::default(),
            }),
            color,
        }
    }

    pub fn widgets(&self) -> Widgets {
        self.lock().widgets.clone()
    }

    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<W>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the widget model and print one line describing the change
    fn update(
        &self,
        line: impl FnOnce(&mut Widgets) -> Option<String>,
    ) -> io::Result<()> {
        let mut inner = self.lock();
        match line(&mut inner.widgets) {
            Some(text) => {
                writeln!(inner.out, "{text}")?;
                inner.out.flush()
            }
            None => Ok(()),
        }
    }

    fn paint(&self, label: &str, hex: &str) -> String {
        match (self.color, parse_hex(hex)) {
            (true, Some((r, g, b))) => format!("\x1b[48;2;{r};{g};{b}m {label} \x1b[0m"),
            _ => format!("[ {label} ]"),
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn format_row(row: &TableRow) -> String {
    match row {
        TableRow::Cells(cells) => format!("| {} |", cells.join(" | ")),
        TableRow::Notice { text, colspan } => {
            let width = colspan * 12;
            format!("| {text:^width$} |")
        }
    }
}

impl<W: Write + Send> PredictionOutput for TerminalView<W> {
    fn render(&self, display: PredictionDisplay) {
        let text = display.to_string();
        let result = self.update(|w| {
            w.predict_result = text.clone();
            Some(format!("[predict] {}", text.replace('\n', "\n[predict] ")))
        });
        if let Err(e) = result {
            tracing::warn!("failed to draw predict result: {e}");
        }
    }
}

impl<W: Write + Send> CrawlOutput for TerminalView<W> {
    fn set_trigger(&self, appearance: &TriggerAppearance) {
        let button = self.paint(&appearance.label, &appearance.color);
        let result = self.update(|w| {
            w.crawl_trigger = appearance.clone();
            let state = if appearance.enabled { "" } else { " (disabled)" };
            Some(format!("[crawl] {button}{state}"))
        });
        if let Err(e) = result {
            tracing::warn!("failed to draw crawl button: {e}");
        }
    }

    fn set_loading_visible(&self, visible: bool) {
        let result = self.update(|w| {
            w.loading_visible = visible;
            visible.then(|| "[crawl] 검색 중입니다...".to_string())
        });
        if let Err(e) = result {
            tracing::warn!("failed to draw loading indicator: {e}");
        }
    }

    fn clear_rows(&self) {
        let _ = self.update(|w| {
            w.rows.clear();
            None
        });
    }

    fn append_row(&self, row: TableRow) -> Result<(), RenderError> {
        let line = format_row(&row);
        self.update(|w| {
            w.rows.push(row);
            Some(line)
        })
        .map_err(|e| RenderError(e.to_string()))
    }

    fn set_result_area_visible(&self, visible: bool) {
        let _ = self.update(|w| {
            w.result_area_visible = visible;
            None
        });
    }

    fn alert(&self, message: &str) {
        let result = self.update(|w| {
            w.alerts += 1;
            Some(format!("[alert] {message}"))
        });
        if let Err(e) = result {
            tracing::error!("failed to show alert '{message}': {e}");
        }
    }
}
