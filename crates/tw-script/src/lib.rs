//! The scripting engine capability contract (spec §6 "Scripting contract",
//! §9 "Scripting as a capability").
//!
//! The script engine is a capability, not a base class: the parser holds an
//! `Option<Box<dyn ScriptEngine>>` and its absence is a silent no-op. Engine
//! errors are logged and never interrupt parsing (spec §7).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script engine error: {}", self.message)
    }
}

impl std::error::Error for ScriptError {}

/// The four calls the parser makes, in order, for every completed logical
/// line (spec §6).
pub trait ScriptEngine: Send {
    fn process_text(&mut self, line: &str) -> Result<(), ScriptError>;
    fn process_text_line(&mut self, line: &str) -> Result<(), ScriptError>;
    fn activate_triggers(&mut self) -> Result<(), ScriptError>;
    fn process_auto_text(&mut self, line: &str) -> Result<(), ScriptError>;
}

/// Drive the four-call contract against an optional engine, logging (never
/// propagating) any failure. A `None` engine is a silent no-op, matching the
/// capability-not-inheritance design in spec §9.
pub fn notify_line(engine: &mut Option<Box<dyn ScriptEngine>>, line: &str) {
    let Some(engine) = engine.as_mut() else {
        return;
    };
    if let Err(e) = engine.process_text(line) {
        tracing::warn!(target: "script", error = %e, "process_text failed");
    }
    if let Err(e) = engine.process_text_line(line) {
        tracing::warn!(target: "script", error = %e, "process_text_line failed");
    }
    if let Err(e) = engine.activate_triggers() {
        tracing::warn!(target: "script", error = %e, "activate_triggers failed");
    }
    if let Err(e) = engine.process_auto_text(line) {
        tracing::warn!(target: "script", error = %e, "process_auto_text failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingEngine {
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_triggers: bool,
    }

    impl ScriptEngine for RecordingEngine {
        fn process_text(&mut self, _line: &str) -> Result<(), ScriptError> {
            self.calls.borrow_mut().push("process_text");
            Ok(())
        }
        fn process_text_line(&mut self, _line: &str) -> Result<(), ScriptError> {
            self.calls.borrow_mut().push("process_text_line");
            Ok(())
        }
        fn activate_triggers(&mut self) -> Result<(), ScriptError> {
            self.calls.borrow_mut().push("activate_triggers");
            if self.fail_triggers {
                return Err(ScriptError {
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
        fn process_auto_text(&mut self, _line: &str) -> Result<(), ScriptError> {
            self.calls.borrow_mut().push("process_auto_text");
            Ok(())
        }
    }

    #[test]
    fn calls_all_four_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut engine: Option<Box<dyn ScriptEngine>> = Some(Box::new(RecordingEngine {
            calls: calls.clone(),
            fail_triggers: false,
        }));
        notify_line(&mut engine, "Sector  : 1 in Fed Space");
        assert_eq!(
            *calls.borrow(),
            vec![
                "process_text",
                "process_text_line",
                "activate_triggers",
                "process_auto_text",
            ]
        );
    }

    #[test]
    fn absent_engine_is_a_silent_noop() {
        let mut engine: Option<Box<dyn ScriptEngine>> = None;
        notify_line(&mut engine, "anything"); // must not panic
    }

    #[test]
    fn engine_error_does_not_propagate() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut engine: Option<Box<dyn ScriptEngine>> = Some(Box::new(RecordingEngine {
            calls,
            fail_triggers: true,
        }));
        notify_line(&mut engine, "line"); // must not panic despite the Err
    }
}
