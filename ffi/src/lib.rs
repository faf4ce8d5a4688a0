//! C-ABI wrapper around `cardlist-core`.
//!
//! # Overview
//! Lets a GUI written in any language with a C FFI drive one card list
//! panel: select a list, refresh it, read the cards, produce a drag payload
//! and hand drops back to the engine.
//!
//! # Design
//! - The host owns the store transport and passes it in as an
//!   `FfiStoreCallback` plus an optional release callback.
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Fallible calls return an `FfiStatus`; the message of the last failure
//!   is available through `cardlist_last_error`.
//! - Strings returned by this library are owned by the caller and must be
//!   released with `cardlist_free_string`.

pub mod types;

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use cardlist_core::{CardCollection, NO_LIST};

use types::*;

// ---------------------------------------------------------------------------
// Collection lifecycle
// ---------------------------------------------------------------------------

/// Create an empty collection with no list selected.
///
/// Returns null if `callback` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `cardlist_collection_free`.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_collection_new(
    callback: Option<FfiStoreCallback>,
    release: Option<FfiStoreRelease>,
    user_data: *mut c_void,
) -> *mut FfiCardCollection {
    catch_unwind(|| {
        let Some(callback) = callback else {
            return std::ptr::null_mut();
        };
        let store = CallbackStore {
            callback,
            release,
            user_data,
        };
        Box::into_raw(Box::new(FfiCardCollection {
            inner: CardCollection::new(store),
            last_error: None,
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a collection created by `cardlist_collection_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_collection_free(collection: *mut FfiCardCollection) {
    if !collection.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(collection) });
        });
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Select `list_id` and load its cards. `-1` clears the selection.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_show_list_cards(collection: *mut FfiCardCollection, list_id: i64) -> FfiStatus {
    catch_unwind(|| {
        if collection.is_null() {
            return FfiStatus::NullArg;
        }
        let collection = unsafe { &mut *collection };
        let result = collection.inner.show_list_cards(list_id);
        collection.record(result).0
    })
    .unwrap_or(FfiStatus::Panic)
}

/// Reload the selected list. On failure the previous cards stay in place.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_refresh(collection: *mut FfiCardCollection) -> FfiStatus {
    catch_unwind(|| {
        if collection.is_null() {
            return FfiStatus::NullArg;
        }
        let collection = unsafe { &mut *collection };
        let result = collection.inner.refresh();
        collection.record(result).0
    })
    .unwrap_or(FfiStatus::Panic)
}

/// Hand a drop to the engine.
///
/// On `Ok`, `*handled` is false when the payload was not a card and true
/// when the drop was consumed. Store failures return their status and leave
/// `*handled` untouched.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_accept_drop(
    collection: *mut FfiCardCollection,
    payload: *const c_char,
    drop_row: u32,
    handled: *mut bool,
) -> FfiStatus {
    catch_unwind(|| {
        if collection.is_null() || payload.is_null() || handled.is_null() {
            return FfiStatus::NullArg;
        }
        let collection = unsafe { &mut *collection };
        let payload = match unsafe { CStr::from_ptr(payload) }.to_str() {
            Ok(p) => p,
            Err(_) => {
                collection.last_error = None;
                unsafe { *handled = false };
                return FfiStatus::Ok;
            }
        };
        let result = collection.inner.accept_drop(payload, drop_row as usize);
        let (status, accepted) = collection.record(result);
        if let Some(accepted) = accepted {
            unsafe { *handled = accepted };
        }
        status
    })
    .unwrap_or(FfiStatus::Panic)
}

/// Drag payload for the first of `selection_len` selected rows.
///
/// Returns null if nothing valid is selected. The caller must free the
/// returned string with `cardlist_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_produce_transfer_payload(
    collection: *const FfiCardCollection,
    selection: *const u32,
    selection_len: u32,
) -> *mut c_char {
    catch_unwind(|| {
        if collection.is_null() || selection.is_null() || selection_len == 0 {
            return std::ptr::null_mut();
        }
        let collection = unsafe { &*collection };
        let rows = unsafe { std::slice::from_raw_parts(selection, selection_len as usize) };
        let rows: Vec<usize> = rows.iter().map(|r| *r as usize).collect();
        match collection.inner.produce_transfer_payload(&rows) {
            Some(payload) => into_c_string(payload),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// The selected list id, `-1` if none or if `collection` is null.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_current_list_id(collection: *const FfiCardCollection) -> i64 {
    catch_unwind(|| {
        if collection.is_null() {
            return NO_LIST;
        }
        let collection = unsafe { &*collection };
        collection.inner.current_list_id()
    })
    .unwrap_or(NO_LIST)
}

#[unsafe(no_mangle)]
pub extern "C" fn cardlist_card_count(collection: *const FfiCardCollection) -> u32 {
    catch_unwind(|| {
        if collection.is_null() {
            return 0;
        }
        let collection = unsafe { &*collection };
        collection.inner.len() as u32
    })
    .unwrap_or(0)
}

/// The cards in display order as a JSON array.
///
/// Returns null if `collection` is null. The caller must free the returned
/// string with `cardlist_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_cards_json(collection: *const FfiCardCollection) -> *mut c_char {
    catch_unwind(|| {
        if collection.is_null() {
            return std::ptr::null_mut();
        }
        let collection = unsafe { &*collection };
        match serde_json::to_string(collection.inner.cards()) {
            Ok(json) => into_c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Message of the last failed call on `collection`, or null.
///
/// The string is borrowed: valid until the next call on the same collection.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_last_error(collection: *const FfiCardCollection) -> *const c_char {
    catch_unwind(|| {
        if collection.is_null() {
            return std::ptr::null();
        }
        let collection = unsafe { &*collection };
        match &collection.last_error {
            Some(msg) => msg.as_ptr(),
            None => std::ptr::null(),
        }
    })
    .unwrap_or(std::ptr::null())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cardlist_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    const FIVE_CARDS: &str = "title\tid\tcontent\tdue\na\t10\t\t-1\nb\t11\t\t-1\nc\t12\t\t-1\nd\t13\t\t-1\ne\t14\t\t-1\n";

    /// Host-side store: records commands, replays responses, null when out.
    #[derive(Default)]
    struct HostStore {
        commands: Vec<String>,
        responses: VecDeque<String>,
    }

    extern "C" fn host_run(user_data: *mut c_void, command: *const c_char) -> *mut c_char {
        let store = unsafe { &mut *(user_data as *mut HostStore) };
        let command = unsafe { CStr::from_ptr(command) }.to_str().unwrap().to_string();
        store.commands.push(command);
        match store.responses.pop_front() {
            Some(response) => CString::new(response).unwrap().into_raw(),
            None => std::ptr::null_mut(),
        }
    }

    extern "C" fn host_release(_user_data: *mut c_void, response: *mut c_char) {
        drop(unsafe { CString::from_raw(response) });
    }

    fn new_collection(store: &mut HostStore) -> *mut FfiCardCollection {
        cardlist_collection_new(
            Some(host_run),
            Some(host_release),
            store as *mut HostStore as *mut c_void,
        )
    }

    fn take_string(s: *mut c_char) -> String {
        assert!(!s.is_null());
        let out = unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string();
        cardlist_free_string(s);
        out
    }

    #[test]
    fn collection_new_and_free() {
        let mut store = HostStore::default();
        let collection = new_collection(&mut store);
        assert!(!collection.is_null());
        assert_eq!(cardlist_current_list_id(collection), -1);
        assert_eq!(cardlist_card_count(collection), 0);
        cardlist_collection_free(collection);
    }

    #[test]
    fn collection_new_without_callback_returns_null() {
        let collection = cardlist_collection_new(None, None, std::ptr::null_mut());
        assert!(collection.is_null());
    }

    #[test]
    fn collection_free_null_is_safe() {
        cardlist_collection_free(std::ptr::null_mut());
    }

    #[test]
    fn show_list_cards_loads_in_display_order() {
        let mut store = HostStore {
            responses: VecDeque::from([FIVE_CARDS.to_string()]),
            ..Default::default()
        };
        let collection = new_collection(&mut store);

        assert_eq!(cardlist_show_list_cards(collection, 4), FfiStatus::Ok);
        assert_eq!(cardlist_current_list_id(collection), 4);
        assert_eq!(cardlist_card_count(collection), 5);

        let json: serde_json::Value = serde_json::from_str(&take_string(cardlist_cards_json(collection))).unwrap();
        assert_eq!(json[0]["title"], "e");
        assert_eq!(json[4]["position"], 0);

        cardlist_collection_free(collection);
        assert_eq!(store.commands, vec!["show-cards 4"]);
    }

    #[test]
    fn store_failure_reports_status_and_message() {
        let mut store = HostStore::default();
        let collection = new_collection(&mut store);

        assert_eq!(cardlist_show_list_cards(collection, 4), FfiStatus::StoreUnavailable);
        let msg = unsafe { CStr::from_ptr(cardlist_last_error(collection)) }.to_str().unwrap().to_string();
        assert!(msg.contains("returned null"));

        cardlist_collection_free(collection);
    }

    #[test]
    fn malformed_response_reports_status() {
        let mut store = HostStore {
            responses: VecDeque::from(["title\tid\n".to_string()]),
            ..Default::default()
        };
        let collection = new_collection(&mut store);

        assert_eq!(cardlist_show_list_cards(collection, 1), FfiStatus::MalformedResponse);
        cardlist_collection_free(collection);
    }

    #[test]
    fn drag_round_trip_moves_card() {
        let mut store = HostStore {
            responses: VecDeque::from([FIVE_CARDS.to_string(), String::new(), FIVE_CARDS.to_string()]),
            ..Default::default()
        };
        let collection = new_collection(&mut store);
        cardlist_show_list_cards(collection, 1);

        let selection = [1u32, 2];
        let payload = cardlist_produce_transfer_payload(collection, selection.as_ptr(), 2);
        let payload_text = unsafe { CStr::from_ptr(payload) }.to_str().unwrap().to_string();
        assert_eq!(payload_text, "CARD::13::3::d");

        let mut handled = false;
        assert_eq!(cardlist_accept_drop(collection, payload, 3, &mut handled), FfiStatus::Ok);
        assert!(handled);
        assert!(cardlist_last_error(collection).is_null());

        cardlist_free_string(payload);
        cardlist_collection_free(collection);
        assert_eq!(store.commands, vec!["show-cards 1", "shift-card 13 to 2", "show-cards 1"]);
    }

    #[test]
    fn foreign_payload_is_not_handled() {
        let mut store = HostStore::default();
        let collection = new_collection(&mut store);

        let payload = CString::new("NOTE::1::0::x").unwrap();
        let mut handled = true;
        assert_eq!(cardlist_accept_drop(collection, payload.as_ptr(), 0, &mut handled), FfiStatus::Ok);
        assert!(!handled);

        cardlist_collection_free(collection);
        assert!(store.commands.is_empty());
    }

    #[test]
    fn non_utf8_payload_clears_previous_error() {
        let mut store = HostStore::default();
        let collection = new_collection(&mut store);
        assert_eq!(cardlist_show_list_cards(collection, 4), FfiStatus::StoreUnavailable);
        assert!(!cardlist_last_error(collection).is_null());

        let payload = CString::new(vec![0xffu8, 0xfe, b':']).unwrap();
        let mut handled = true;
        assert_eq!(cardlist_accept_drop(collection, payload.as_ptr(), 0, &mut handled), FfiStatus::Ok);
        assert!(!handled);
        assert!(cardlist_last_error(collection).is_null());

        cardlist_collection_free(collection);
    }

    #[test]
    fn accept_drop_null_args() {
        let mut handled = false;
        let status = cardlist_accept_drop(std::ptr::null_mut(), std::ptr::null(), 0, &mut handled);
        assert_eq!(status, FfiStatus::NullArg);
    }

    #[test]
    fn empty_selection_has_no_payload() {
        let mut store = HostStore::default();
        let collection = new_collection(&mut store);
        let selection = [0u32];
        assert!(cardlist_produce_transfer_payload(collection, selection.as_ptr(), 1).is_null());
        assert!(cardlist_produce_transfer_payload(collection, std::ptr::null(), 0).is_null());
        cardlist_collection_free(collection);
    }

    #[test]
    fn null_collection_queries_are_safe() {
        assert_eq!(cardlist_current_list_id(std::ptr::null()), -1);
        assert_eq!(cardlist_card_count(std::ptr::null()), 0);
        assert!(cardlist_cards_json(std::ptr::null()).is_null());
        assert!(cardlist_last_error(std::ptr::null()).is_null());
        assert_eq!(cardlist_refresh(std::ptr::null_mut()), FfiStatus::NullArg);
    }

    #[test]
    fn free_string_null_is_safe() {
        cardlist_free_string(std::ptr::null_mut());
    }
}
