use std::ffi::{c_char, c_void, CStr};

use gl::types::{GLenum, GLsizei, GLuint};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Notification,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_gl(severity: GLenum) -> Self {
        match severity {
            gl::DEBUG_SEVERITY_HIGH => Self::High,
            gl::DEBUG_SEVERITY_MEDIUM => Self::Medium,
            gl::DEBUG_SEVERITY_LOW => Self::Low,
            _ => Self::Notification,
        }
    }

    pub fn log_level(&self) -> log::Level {
        match self {
            Severity::High => log::Level::Error,
            Severity::Medium => log::Level::Warn,
            Severity::Low => log::Level::Info,
            Severity::Notification => log::Level::Debug,
        }
    }
}

pub fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "api",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "third party",
        gl::DEBUG_SOURCE_APPLICATION => "application",
        gl::DEBUG_SOURCE_OTHER => "other",
        _ => "unknown",
    }
}

pub fn type_name(kind: GLenum) -> &'static str {
    match kind {
        gl::DEBUG_TYPE_ERROR => "error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behavior",
        gl::DEBUG_TYPE_PORTABILITY => "portability",
        gl::DEBUG_TYPE_PERFORMANCE => "performance",
        gl::DEBUG_TYPE_MARKER => "marker",
        gl::DEBUG_TYPE_PUSH_GROUP => "push group",
        gl::DEBUG_TYPE_POP_GROUP => "pop group",
        gl::DEBUG_TYPE_OTHER => "other",
        _ => "unknown",
    }
}

pub fn format_message(source: GLenum, kind: GLenum, id: GLuint, message: &str) -> String {
    format!(
        "[{}] {} ({}): {}",
        source_name(source),
        type_name(kind),
        id,
        message.trim_end()
    )
}

/// Debug output is core since 4.3, older contexts need `KHR_debug`.
pub fn debug_output_supported<'a>(
    major: i32,
    minor: i32,
    mut extensions: impl Iterator<Item = &'a str>,
) -> bool {
    (major, minor) >= (4, 3) || extensions.any(|e| e == "GL_KHR_debug")
}

// the loader resolves any name on GLX, so a loaded pointer proves nothing
fn context_supports_debug_output() -> bool {
    let (mut major, mut minor, mut count) = (0, 0, 0);

    unsafe {
        gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
        gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);
        gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut count);
    }

    let extensions: Vec<String> = (0..count.max(0) as GLuint)
        .filter_map(|i| {
            let ptr = unsafe { gl::GetStringi(gl::EXTENSIONS, i) };
            if ptr.is_null() {
                None
            } else {
                let name = unsafe { CStr::from_ptr(ptr as *const c_char) };
                Some(name.to_string_lossy().into_owned())
            }
        })
        .collect();

    debug_output_supported(major, minor, extensions.iter().map(String::as_str))
}

struct DebugState {
    min_severity: Severity,
}

/// Routes driver debug messages into the logger while alive.
pub struct DebugOutput {
    // the driver holds a raw pointer into this box
    state: Box<DebugState>,
}

impl DebugOutput {
    /// Needs a context exposing `glDebugMessageCallback` (GL 4.3 or `KHR_debug`).
    pub fn install(min_severity: Severity) -> Option<Self> {
        if !gl::DebugMessageCallback::is_loaded() || !context_supports_debug_output() {
            log::warn!("Context has no debug output support, debug output disabled");
            return None;
        }

        let state = Box::new(DebugState { min_severity });

        unsafe {
            gl::Enable(gl::DEBUG_OUTPUT);
            gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
            gl::DebugMessageCallback(
                Some(debug_callback),
                (&*state) as *const DebugState as *const c_void,
            );
        }

        log::info!("OpenGL debug output enabled for {min_severity:?} and above");

        Some(Self { state })
    }
}

impl Drop for DebugOutput {
    fn drop(&mut self) {
        unsafe {
            gl::DebugMessageCallback(None, std::ptr::null());
            gl::Disable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
            gl::Disable(gl::DEBUG_OUTPUT);
        }
    }
}

extern "system" fn debug_callback(
    source: GLenum,
    kind: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const c_char,
    user_param: *mut c_void,
) {
    if message.is_null() || user_param.is_null() {
        return;
    }

    let state = unsafe { &*(user_param as *const DebugState) };
    let severity = Severity::from_gl(severity);

    if severity < state.min_severity {
        return;
    }

    let text = if length >= 0 {
        let bytes = unsafe { std::slice::from_raw_parts(message as *const u8, length as usize) };
        String::from_utf8_lossy(bytes)
    } else {
        unsafe { CStr::from_ptr(message) }.to_string_lossy()
    };

    log::log!(
        target: "opengl",
        severity.log_level(),
        "{}",
        format_message(source, kind, id, &text)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Low > Severity::Notification);
        assert_eq!(
            Severity::from_gl(gl::DEBUG_SEVERITY_NOTIFICATION),
            Severity::Notification
        );
        assert_eq!(Severity::from_gl(gl::DEBUG_SEVERITY_HIGH), Severity::High);
    }

    #[test]
    fn severity_levels() {
        assert_eq!(Severity::High.log_level(), log::Level::Error);
        assert_eq!(Severity::Notification.log_level(), log::Level::Debug);
    }

    #[test]
    fn formats_message() {
        let msg = format_message(
            gl::DEBUG_SOURCE_API,
            gl::DEBUG_TYPE_ERROR,
            1282,
            "GL_INVALID_OPERATION in glDrawElements\n",
        );

        assert_eq!(
            msg,
            "[api] error (1282): GL_INVALID_OPERATION in glDrawElements"
        );
    }

    #[test]
    fn debug_output_needs_4_3_or_khr_debug() {
        assert!(debug_output_supported(4, 3, std::iter::empty()));
        assert!(debug_output_supported(4, 6, std::iter::empty()));
        assert!(!debug_output_supported(3, 3, std::iter::empty()));
        assert!(!debug_output_supported(4, 2, ["GL_ARB_debug_output"].into_iter()));
        assert!(debug_output_supported(
            3,
            3,
            ["GL_ARB_sync", "GL_KHR_debug"].into_iter()
        ));
    }

    #[test]
    fn unknown_enums() {
        assert_eq!(source_name(0), "unknown");
        assert_eq!(type_name(0), "unknown");
    }
}
