use crate::app::{App, Message, Model, ToastLevel};
use crate::export::{DirectorySink, ExportSink, export};

// Events here fire while the alternate screen is up, so they stay below the
// default WARN filter. The toast is what the user sees.
impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Export => {
                let mut sink = DirectorySink::new(model.export_dir.clone());
                Self::export_to(model, &mut sink);
            }
            Message::Reload if std::mem::take(&mut model.reload_pending) => {
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                    tracing::debug!(error = %err, "reload failed");
                    crate::perf::log_event("reload.error", format!("err={err}"));
                } else {
                    model.show_toast(ToastLevel::Info, "Reloaded");
                }
            }
            _ => {}
        }
    }

    /// Export the buffer under the current name and report the outcome.
    pub(super) fn export_to(model: &mut Model, sink: &mut impl ExportSink) {
        let artifact = export(&model.buffer, &model.file_name);
        let revision = model.buffer.revision();
        match sink.save(&artifact) {
            Ok(path) => {
                tracing::debug!(
                    path = %path.display(),
                    media_type = artifact.media_type(),
                    bytes = artifact.bytes().len(),
                    "exported buffer"
                );
                crate::perf::log_event(
                    "export.saved",
                    format!("revision={revision} path={}", path.display()),
                );
                model.mark_clean(revision);
                if artifact.has_empty_base() {
                    model.show_toast(
                        ToastLevel::Warning,
                        format!("Exported with an empty name: {}", path.display()),
                    );
                } else {
                    model.show_toast(ToastLevel::Info, format!("Exported {}", path.display()));
                }
                if model.quit_confirmed {
                    model.should_quit = true;
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, file = artifact.file_name(), "export failed");
                crate::perf::log_event("export.error", format!("revision={revision} err={err}"));
                model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
            }
        }
    }
}
