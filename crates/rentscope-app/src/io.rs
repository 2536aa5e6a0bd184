use anyhow::{anyhow, bail};
use kanal::AsyncSender;
use rentscope_types::{AppEvent, CrawlField, PredictField, Trigger};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
commands:
  set <field> <value>     address | area | floor | year_built | housing_type | rent_type
                          sido | sigungu | road | bldg
  check <group> <value>   tp (아파트|연립다세대|단독다가구|오피스텔) | addrType (지번|도로명)
  click predict|crawl
  show
  quit";

/// Turn one input line into a page event. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<AppEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();

    let event = match verb {
        "set" => {
            let (id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if id.is_empty() {
                bail!("usage: set <field> <value>");
            }
            let value = value.trim_start().to_string();

            if let Some(field) = PredictField::from_id(id) {
                AppEvent::PredictInput { field, value }
            } else if let Some(field) = CrawlField::from_id(id).filter(|f| !f.is_radio()) {
                AppEvent::CrawlInput { field, value }
            } else {
                bail!("unknown field '{id}'");
            }
        }
        "check" => {
            let (group, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: check <group> <value>"))?;
            let field = CrawlField::from_id(group)
                .filter(CrawlField::is_radio)
                .ok_or_else(|| anyhow!("unknown radio group '{group}'"))?;
            AppEvent::CrawlSelect {
                field,
                value: value.trim().to_string(),
            }
        }
        "click" => match rest {
            "predict" | "predictBtn" => AppEvent::Click(Trigger::Predict),
            "crawl" | "crawlBtn" => AppEvent::Click(Trigger::Crawl),
            other => bail!("unknown button '{other}'"),
        },
        "show" => AppEvent::Dump,
        "quit" | "exit" => AppEvent::Shutdown,
        other => bail!("unknown command '{other}'"),
    };

    Ok(Some(event))
}

/// Feed commands from `reader` into the event loop until EOF, a read error
/// or cancellation. EOF and read errors both ask the loop to shut down.
pub async fn watcher_io<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = cancel.cancelled() => {
                tracing::info!("Input watcher stopping");
                return Ok(());
            }
        };

        // An unreadable stream ends input the same way EOF does
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                event_tx.send(AppEvent::Shutdown).await?;
                return Err(e.into());
            }
        };

        let Some(line) = line else {
            tracing::info!("Input closed");
            event_tx.send(AppEvent::Shutdown).await?;
            return Ok(());
        };

        match parse_command(&line) {
            Ok(Some(event)) => {
                if let Err(e) = event_tx.send(event).await {
                    tracing::error!("Failed to send input event: {}", e);
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("{e}");
                eprintln!("{e}\n{HELP}");
            }
        }
    }
}
