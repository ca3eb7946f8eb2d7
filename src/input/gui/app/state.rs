use crate::core::camera::{CameraError, CameraLimits, CameraModel};
use crate::core::fractals::{FractalKinds, FractalParameters};
use crate::core::shader::ShaderError;

/// One line per failed variant, in load order.
#[must_use]
pub fn describe_load_failures(failures: &[(FractalKinds, ShaderError)]) -> String {
    failures
        .iter()
        .map(|(kind, error)| format!("{kind}: {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything the user can change from the window.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub selected_fractal: FractalKinds,
    pub params: FractalParameters,
    pub camera: CameraModel,
    last_error_message: Option<String>,
    frame_error_message: Option<String>,
    status_message: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            selected_fractal: FractalKinds::default(),
            params: FractalParameters::default(),
            camera: CameraModel::default(),
            last_error_message: None,
            frame_error_message: None,
            status_message: None,
        }
    }
}

impl ViewerState {
    pub fn new(limits: CameraLimits) -> Result<Self, CameraError> {
        Ok(Self {
            camera: CameraModel::new(limits)?,
            ..Self::default()
        })
    }

    /// Shows `message` in the panel. Returns whether it differs from the one
    /// already shown, so repeated per-frame failures are logged once.
    pub fn report_error(&mut self, message: String) -> bool {
        if self.last_error_message.as_deref() == Some(message.as_str()) {
            return false;
        }

        self.last_error_message = Some(message);
        true
    }

    pub fn clear_error(&mut self) {
        self.last_error_message = None;
    }

    /// Like [`Self::report_error`], for failures of the frame being drawn.
    /// These go away on the next good frame without touching load errors.
    pub fn report_frame_error(&mut self, message: String) -> bool {
        if self.frame_error_message.as_deref() == Some(message.as_str()) {
            return false;
        }

        self.frame_error_message = Some(message);
        true
    }

    pub fn clear_frame_error(&mut self) {
        self.frame_error_message = None;
    }

    /// Messages to show in the panel, load errors first.
    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.last_error_message
            .as_deref()
            .into_iter()
            .chain(self.frame_error_message.as_deref())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }
}
