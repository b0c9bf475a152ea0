use shiruk_core::render::{render_text, ResultView};
use shiruk_core::{AnalysisController, AnalysisError, HttpPoetryClient, Key, PoetryApi, View};

use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Screen {
    input: String,
    error_visible: bool,
}

/// Line-oriented view: the current line is the text field, everything shown
/// is printed to stdout. Hiding is only tracked, a terminal cannot unprint.
#[derive(Debug, Default)]
pub struct TerminalView {
    screen: Mutex<Screen>,
}

impl TerminalView {
    fn screen(&self) -> std::sync::MutexGuard<'_, Screen> {
        self.screen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn print(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
        let _ = stdout.flush();
    }
}

impl View for TerminalView {
    fn input_text(&self) -> String {
        self.screen().input.clone()
    }

    fn set_input_text(&self, text: &str) {
        self.screen().input = text.to_owned();
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            self.print("…");
        }
    }

    fn set_trigger_enabled(&self, _enabled: bool) {}

    fn show_result(&self, result: &ResultView) {
        self.print(&render_text(result));
    }

    fn hide_result(&self) {}

    fn show_error(&self, message: &str) {
        self.screen().error_visible = true;
        self.print(&format!("⚠️ {message}"));
    }

    fn hide_error(&self) {
        self.screen().error_visible = false;
    }
}

type Controller = AnalysisController<HttpPoetryClient, TerminalView>;

/// Reads stdin until EOF or `:quit`. Each line is submitted in the background
/// so `:clear` stays available while a request is in flight.
pub async fn run(controller: Controller) -> anyhow::Result<()> {
    run_with_input(controller, BufReader::new(tokio::io::stdin())).await
}

async fn run_with_input<A, R>(
    controller: AnalysisController<A, TerminalView>,
    input: R,
) -> anyhow::Result<()>
where
    A: PoetryApi + 'static,
    R: AsyncBufRead + Unpin,
{
    let probe = tokio::spawn({
        let controller = controller.clone();
        async move {
            let _ = controller.check_backend_health().await;
        }
    });

    eprintln!("type a text and press Enter; :clear resets the form, :quit exits");

    let mut lines = input.split(b'\n');
    let mut pending: Option<JoinHandle<()>> = None;

    while let Some(bytes) = lines.next_segment().await? {
        let Some(line) = decode_line(bytes) else {
            continue;
        };
        match line.trim() {
            ":q" | ":quit" => break,
            ":clear" => {
                controller.clear();
                tracing::debug!("form cleared");
            }
            _ => {
                if !controller.trigger_enabled() {
                    eprintln!("still waiting for the previous answer");
                    continue;
                }
                controller.view().set_input_text(&line);
                let controller = controller.clone();
                pending = Some(tokio::spawn(async move {
                    match controller.on_key_press(Key::Enter, false).await {
                        Some(Err(AnalysisError::Busy)) => {
                            eprintln!("still waiting for the previous answer");
                        }
                        Some(Err(e)) => tracing::debug!(error = %e, "submission failed"),
                        _ => {}
                    }
                }));
            }
        }
    }

    // let a piped-in last line finish before exiting
    if let Some(handle) = pending {
        handle.await?;
    }
    probe.abort();
    Ok(())
}

/// `None` for a line that is not UTF-8; the session keeps going without it.
fn decode_line(mut bytes: Vec<u8>) -> Option<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::warn!(
                line = %String::from_utf8_lossy(e.as_bytes()),
                "skipping input line that is not valid UTF-8"
            );
            eprintln!("could not read that line as UTF-8, try again");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiruk_core::{ClientConfig, ControllerConfig};

    fn unreachable_client() -> HttpPoetryClient {
        // bind then drop so nothing listens on the port
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        HttpPoetryClient::new(ClientConfig {
            api_base: format!("http://{addr}"),
            request_timeout: None,
        })
        .unwrap()
    }

    #[test]
    fn test_input_round_trips_through_view() {
        let view = TerminalView::default();
        view.set_input_text("مرحبا بالعالم");
        assert_eq!(view.input_text(), "مرحبا بالعالم");
    }

    #[test]
    fn test_error_visibility_is_tracked() {
        let view = TerminalView::default();
        view.show_error("boom");
        assert!(view.screen().error_visible);
        view.hide_error();
        assert!(!view.screen().error_visible);
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line("أنا سعيد".as_bytes().to_vec()).as_deref(), Some("أنا سعيد"));
        assert_eq!(decode_line(b"hello\r".to_vec()).as_deref(), Some("hello"));
        assert_eq!(decode_line(vec![0xff, 0xfe, b'a']), None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let controller = AnalysisController::new(
            unreachable_client(),
            TerminalView::default(),
            ControllerConfig::default(),
        );
        controller.view().set_input_text("leftover");

        let input: &[u8] = b"\xff\xfe\n:clear\n";
        run_with_input(controller.clone(), input).await.unwrap();

        // `:clear` after the bad line still ran
        assert_eq!(controller.view().input_text(), "");
    }
}
