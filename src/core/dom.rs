//! Element helpers working against the in-memory [`Element`] model.

use crate::domain::model::{Element, ScrollBehavior, ScrollTarget, SharedElement};
use crate::domain::ports::Viewport;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

pub const HIDDEN_CLASS: &str = "hidden";
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_millis(300);

const SLIDE_KICKOFF: Duration = Duration::from_millis(10);

/// Creates an element; `className` and `innerHTML` keys are applied as properties,
/// every other key becomes an attribute.
pub fn create_element(tag: &str, attributes: &[(&str, &str)], content: &str) -> Element {
    let mut element = Element::new(tag);

    for (key, value) in attributes {
        match *key {
            "className" => element.set_class_name(value),
            "innerHTML" => element.inner_html = value.to_string(),
            _ => element.set_attribute(key, value),
        }
    }

    if !content.is_empty() {
        element.text_content = content.to_string();
    }

    element
}

/// `None` flips visibility based on the current `hidden` class.
pub fn toggle(element: &mut Element, show: Option<bool>) {
    let show = show.unwrap_or_else(|| element.has_class(HIDDEN_CLASS));

    if show {
        element.remove_class(HIDDEN_CLASS);
    } else {
        element.add_class(HIDDEN_CLASS);
    }
}

pub fn is_collapsed(element: &Element) -> bool {
    element.style("display") == "none" || element.style("height") == "0px"
}

fn with_element(element: &SharedElement, f: impl FnOnce(&mut Element)) {
    let mut guard = element.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard);
}

/// Animates the element's height open or closed over `duration`.
///
/// The initial style changes happen synchronously; the returned task applies the
/// kickoff step after 10 ms and the final step after `duration`. Must be called
/// inside a Tokio runtime.
pub fn slide_toggle(element: SharedElement, duration: Duration) -> JoinHandle<()> {
    let transition = format!("height {}ms ease", duration.as_millis());
    let mut opening = false;
    let mut target_height = 0.0;

    with_element(&element, |el| {
        if is_collapsed(el) {
            opening = true;
            el.set_style("display", "block");
            el.set_style("height", "auto");
            target_height = el.offset_height;
            el.set_style("height", "0px");
            el.set_style("transition", &transition);
        } else {
            el.set_style("transition", &transition);
            el.set_style("height", &format!("{}px", el.offset_height));
        }
    });

    tracing::debug!(
        "slide_toggle: {} <{}> over {:?}",
        if opening { "opening" } else { "closing" },
        element.lock().map(|el| el.tag.clone()).unwrap_or_default(),
        duration
    );

    let start = Instant::now();
    tokio::spawn(async move {
        let kickoff = async {
            sleep_until(start + SLIDE_KICKOFF).await;
            with_element(&element, |el| {
                if opening {
                    el.set_style("height", &format!("{}px", target_height));
                } else {
                    el.set_style("height", "0px");
                }
            });
        };

        let finish = async {
            sleep_until(start + duration).await;
            with_element(&element, |el| {
                if opening {
                    el.set_style("height", "auto");
                } else {
                    el.set_style("display", "none");
                }
                el.set_style("transition", "");
            });
        };

        tokio::join!(kickoff, finish);
    })
}

/// 平滑捲動至元素位置，offset 用於扣除固定標頭高度
pub fn scroll_to<V: Viewport + ?Sized>(viewport: &mut V, element: &Element, offset: f64) {
    viewport.scroll_to(ScrollTarget {
        top: element.offset_top - offset,
        behavior: ScrollBehavior::Smooth,
    });
}
