use std::io;

use rentscope_config::ui::UiConfig;
use rentscope_ui::TerminalView;

use crate::state::PageView;

/// Page view on stdout; button colors only when stdout is a terminal
pub fn stdout_view(config: &UiConfig) -> PageView {
    let color = config.color && atty::is(atty::Stream::Stdout);
    TerminalView::new(Box::new(io::stdout()), color)
}
