// C ABI for hosts that drive the engine from another runtime (a dataframe
// UI, a spreadsheet plugin). Strings cross the boundary as UTF-8 JSON and
// every entry point catches panics.
use crate::SentimentEngine;
use libc::c_char;
use std::borrow::Cow;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use tracing::{error, info, warn};

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_last_error(message: String) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

fn engine() -> Option<&'static SentimentEngine> {
    match SentimentEngine::shared() {
        Ok(engine) => Some(engine),
        Err(e) => {
            set_last_error(e.to_string());
            None
        }
    }
}

/// Null input is read as empty text; invalid UTF-8 bytes are replaced so
/// the rest of the text still counts.
unsafe fn input_str<'a>(text: *const c_char) -> Cow<'a, str> {
    if text.is_null() {
        return Cow::Borrowed("");
    }
    CStr::from_ptr(text).to_string_lossy()
}

fn into_c_string(json: Option<String>) -> *mut c_char {
    json.and_then(|s| CString::new(s).ok())
        .map_or(ptr::null_mut(), CString::into_raw)
}

/// Loads the lexicon. Returns 0 on success and -1 when the lexicon is
/// unavailable; the failure is remembered and returned by later calls.
#[no_mangle]
pub extern "C" fn feedback_sentiment_init() -> i32 {
    let result = catch_unwind(|| match engine() {
        Some(engine) => {
            info!(words = engine.lexicon().len(), "sentiment engine initialised");
            0
        }
        None => {
            error!("sentiment engine could not be initialised");
            -1
        }
    });
    result.unwrap_or_else(|_| {
        set_last_error("panic during engine initialisation".to_string());
        -1
    })
}

/// Scores one text and returns `{"label": ..., "score": ...}`, or null if
/// the engine is unavailable. Free the result with `feedback_sentiment_free_string`.
///
/// # Safety
/// `text` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn feedback_sentiment_analyze(text: *const c_char) -> *mut c_char {
    let text = input_str(text);
    let json = catch_unwind(AssertUnwindSafe(|| {
        let engine = engine()?;
        serde_json::to_string(&engine.analyze(&text).to_output()).ok()
    }));
    into_c_string(json.unwrap_or_else(|_| {
        set_last_error("panic in feedback_sentiment_analyze".to_string());
        None
    }))
}

/// Scores a JSON array of cells and returns `{"rows": [...], "summary": {...}}`.
/// Cells that are not strings are scored as empty text. Returns null if the
/// engine is unavailable or the input is not a JSON array.
///
/// # Safety
/// `column_json` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn feedback_sentiment_analyze_batch(column_json: *const c_char) -> *mut c_char {
    let raw = input_str(column_json);
    let json = catch_unwind(AssertUnwindSafe(|| {
        let engine = engine()?;
        let column: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(column) => column,
            Err(e) => {
                warn!(error = %e, "batch input is not a JSON array");
                set_last_error(format!("batch input is not a JSON array: {e}"));
                return None;
            }
        };
        let report = engine.batch().analyze_batch(column.iter());
        serde_json::to_string(&report).ok()
    }));
    into_c_string(json.unwrap_or_else(|_| {
        set_last_error("panic in feedback_sentiment_analyze_batch".to_string());
        None
    }))
}

/// The most recent error on this thread, or null.
#[no_mangle]
pub extern "C" fn feedback_sentiment_last_error() -> *mut c_char {
    into_c_string(LAST_ERROR.with(|slot| slot.borrow().clone()))
}

/// # Safety
/// `s` must be null or a pointer previously returned by this library.
#[no_mangle]
pub unsafe extern "C" fn feedback_sentiment_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(ptr: *mut c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        let s = CStr::from_ptr(ptr).to_str().unwrap().to_string();
        feedback_sentiment_free_string(ptr);
        Some(s)
    }

    #[test]
    fn analyze_round_trips_through_c_strings() {
        assert_eq!(feedback_sentiment_init(), 0);
        let input = CString::new("I love this").unwrap();
        let json = unsafe { take(feedback_sentiment_analyze(input.as_ptr())) }.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["label"], "Positive");
        assert_eq!(value["score"], 0.637);
    }

    #[test]
    fn null_text_is_neutral() {
        let json = unsafe { take(feedback_sentiment_analyze(ptr::null())) }.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["label"], "Neutral");
        assert_eq!(value["score"], 0.0);
    }

    #[test]
    fn invalid_bytes_do_not_blank_the_text() {
        let input = CString::new(b"good \xff service".to_vec()).unwrap();
        let json = unsafe { take(feedback_sentiment_analyze(input.as_ptr())) }.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["label"], "Positive");
        assert_eq!(value["score"], 0.44);
    }

    #[test]
    fn batch_absorbs_non_text_cells() {
        let input = CString::new(r#"["great", null, 7, "awful"]"#).unwrap();
        let json = unsafe { take(feedback_sentiment_analyze_batch(input.as_ptr())) }.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
        assert_eq!(value["rows"][2]["label"], "Neutral");
        assert_eq!(value["summary"]["Positive"], 1);
        assert_eq!(value["summary"]["Neutral"], 2);
        assert_eq!(value["summary"]["Negative"], 1);
    }

    #[test]
    fn malformed_batch_sets_last_error() {
        let input = CString::new("{not json").unwrap();
        let result = unsafe { take(feedback_sentiment_analyze_batch(input.as_ptr())) };
        assert!(result.is_none());
        let message = unsafe { take(feedback_sentiment_last_error()) }.unwrap();
        assert!(message.contains("JSON array"));
    }
}
