//! [`ViewportQueryEngine`] backed by the browser's `window.matchMedia`.

use tracing::warn;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::engine::{MatchListener, Registration, ViewportQueryEngine};

#[derive(Clone, Copy, Debug, Default)]
pub struct MatchMediaEngine;

pub struct MatchMediaHandle {
    list: Option<MediaQueryList>,
    closure: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl ViewportQueryEngine for MatchMediaEngine {
    type Handle = MatchMediaHandle;

    fn register(&self, query: &str, listener: MatchListener) -> Registration<Self::Handle> {
        let callback = move |event: MediaQueryListEvent| listener(event.matches());
        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(callback);

        let list = match web_sys::window().map(|window| window.match_media(query)) {
            Some(Ok(Some(list))) => Some(list),
            Some(Ok(None)) | Some(Err(_)) => {
                warn!(%query, "matchMedia rejected media query");
                None
            }
            None => {
                warn!(%query, "no window to evaluate media query against");
                None
            }
        };

        let mut matches = false;
        if let Some(list) = &list {
            matches = list.matches();
            if list
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
                .is_err()
            {
                warn!(%query, "failed to listen for media query changes");
            }
        }

        Registration {
            handle: MatchMediaHandle { list, closure },
            matches,
        }
    }

    fn unregister(&self, handle: Self::Handle) {
        if let Some(list) = handle.list {
            let callback = handle.closure.as_ref().unchecked_ref();
            if list
                .remove_event_listener_with_callback("change", callback)
                .is_err()
            {
                warn!(query = %list.media(), "failed to stop listening for media query changes");
            }
        }
    }
}
