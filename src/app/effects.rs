use crate::app::{Message, Model, ToastLevel};
use crate::file;

/// Perform the work `update` leaves to the outside world.
pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
    if matches!(msg, Message::Save) {
        save(model);
    }
}

fn save(model: &mut Model) {
    let _scope = crate::perf::scope("app.save");
    let Some(path) = model.file_path.clone() else {
        model.show_toast(ToastLevel::Error, "No file name; start red with a path to save");
        return;
    };
    match file::save_atomic(&path, &model.document) {
        Ok(()) => {
            model.document.mark_clean();
            model.show_toast(
                ToastLevel::Info,
                format!(
                    "Saved {} lines to {}",
                    model.document.line_count(),
                    path.display()
                ),
            );
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "save failed");
            model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
        }
    }
}
