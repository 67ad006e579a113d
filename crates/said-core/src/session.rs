//! # Input Session
//!
//! Controller for one ID number input field. It owns the current input and
//! decode result and reacts to the events the field sees:
//!
//! - every keystroke replaces the input and re-decodes it;
//! - a display widget coming online becomes the relay target;
//! - the user asking to see the components or holidays publishes one
//!   payload to the active widget and records a reference.
//!
//! The relay and the persistence backend are injected. A failing backend
//! is logged and remembered as [`IdNumberSession::last_sink_error`]; it never
//! interrupts the input flow.

use serde::Serialize;

use crate::decode::{Decoded, Decoder};
use crate::error::SinkError;
use crate::holidays::HolidayRequestType;
use crate::relay::{MessageRelay, RelayPayload, Widget};
use crate::sink::{ReferenceRecord, ReferenceSink};

/// Which display widgets the user has asked to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub components: bool,
    pub holidays: bool,
}

/// State behind one input field.
#[derive(Debug)]
pub struct IdNumberSession<R, S> {
    decoder: Decoder,
    relay: R,
    sink: S,
    input: String,
    decoded: Decoded,
    active_widget: Option<Widget>,
    holiday_request: Option<HolidayRequestType>,
    visibility: Visibility,
    last_reference_count: Option<u64>,
    last_sink_error: Option<SinkError>,
}

impl<R: MessageRelay, S: ReferenceSink> IdNumberSession<R, S> {
    /// Start a session with empty input.
    pub fn new(decoder: Decoder, relay: R, sink: S) -> Self {
        let decoded = decoder.decode("");
        Self {
            decoder,
            relay,
            sink,
            input: String::new(),
            decoded,
            active_widget: None,
            holiday_request: None,
            visibility: Visibility::default(),
            last_reference_count: None,
            last_sink_error: None,
        }
    }

    /// The input changed. Re-decode and hide both widgets.
    pub fn input_changed(&mut self, raw: impl Into<String>) -> &Decoded {
        self.input = raw.into();
        self.decoded = self.decoder.decode(&self.input);
        self.visibility = Visibility::default();
        &self.decoded
    }

    /// A widget announced itself. Unknown names are ignored.
    pub fn component_online(&mut self, component_name: &str) {
        match Widget::from_component_name(component_name) {
            Some(widget) => {
                tracing::debug!(component = component_name, "widget online");
                self.active_widget = Some(widget);
                self.publish();
            }
            None => tracing::debug!(component = component_name, "ignoring unknown component"),
        }
    }

    /// The user asked to see the decoded fields.
    pub fn show_components(&mut self) {
        self.visibility = Visibility {
            components: true,
            holidays: false,
        };
        self.publish();
        self.record_reference();
    }

    /// The user asked to see holidays around the birth date.
    pub fn show_holidays(&mut self, request: HolidayRequestType) {
        self.visibility = Visibility {
            components: false,
            holidays: true,
        };
        self.holiday_request = Some(request);
        self.publish();
        self.record_reference();
    }

    /// Publish the current payload to the active widget, if any.
    /// Returns whether something was published.
    fn publish(&self) -> bool {
        let Some(widget) = self.active_widget else {
            return false;
        };
        match RelayPayload::for_widget(widget, &self.decoded.components, self.holiday_request) {
            Some(payload) => {
                self.relay.publish(payload);
                true
            }
            None => false,
        }
    }

    fn record_reference(&mut self) {
        let record = ReferenceRecord::new(self.input.clone(), &self.decoded.components);
        match self.sink.record(&record) {
            Ok(count) => {
                self.last_reference_count = Some(count);
                self.last_sink_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "reference sink failed");
                self.last_reference_count = None;
                self.last_sink_error = Some(err);
            }
        }
    }
}

impl<R, S> IdNumberSession<R, S> {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn decoded(&self) -> &Decoded {
        &self.decoded
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn active_widget(&self) -> Option<Widget> {
        self.active_widget
    }

    /// Count returned by the last successful reference call.
    pub fn last_reference_count(&self) -> Option<u64> {
        self.last_reference_count
    }

    /// Error from the last reference call, cleared on the next success.
    pub fn last_sink_error(&self) -> Option<&SinkError> {
        self.last_sink_error.as_ref()
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Citizenship;
    use crate::config::DecoderConfig;
    use crate::sink::InMemoryReferenceCounter;
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingRelay {
        published: RefCell<Vec<RelayPayload>>,
    }

    impl MessageRelay for RecordingRelay {
        fn publish(&self, payload: RelayPayload) {
            self.published.borrow_mut().push(payload);
        }
    }

    #[derive(Default)]
    struct FlakySink {
        fail: Cell<bool>,
    }

    impl ReferenceSink for FlakySink {
        fn record(&self, _record: &ReferenceRecord) -> Result<u64, SinkError> {
            if self.fail.get() {
                Err(SinkError::Unavailable {
                    reason: "backend down".to_string(),
                })
            } else {
                Ok(1)
            }
        }
    }

    fn decoder() -> Decoder {
        Decoder::new(DecoderConfig {
            reference_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            ..DecoderConfig::default()
        })
    }

    fn session() -> IdNumberSession<RecordingRelay, InMemoryReferenceCounter> {
        IdNumberSession::new(
            decoder(),
            RecordingRelay::default(),
            InMemoryReferenceCounter::new(),
        )
    }

    #[test]
    fn starts_with_empty_decode() {
        let s = session();
        assert_eq!(s.input(), "");
        assert_eq!(s.decoded().components.length, 0);
        assert_eq!(s.decoded().message(), "Number must be exactly 13 digits long");
    }

    #[test]
    fn keystrokes_redecode_and_hide_widgets() {
        let mut s = session();
        s.input_changed("8001015009087");
        s.show_components();
        assert!(s.visibility().components);

        let decoded = s.input_changed("800101500908");
        assert!(!decoded.is_valid());
        assert_eq!(s.visibility(), Visibility::default());
    }

    #[test]
    fn nothing_published_without_active_widget() {
        let mut s = session();
        s.input_changed("8001015009087");
        s.show_components();
        assert!(s.relay().published.borrow().is_empty());
        assert_eq!(s.last_reference_count(), Some(1));
    }

    #[test]
    fn components_widget_receives_full_snapshot() {
        let mut s = session();
        s.input_changed("8001015009087");
        s.component_online("showIdComponents");
        s.show_components();

        let published = s.relay().published.borrow();
        assert_eq!(published.len(), 2);
        assert_eq!(
            published[1],
            RelayPayload::Components(s.decoded().components.clone())
        );
    }

    #[test]
    fn holiday_widget_waits_for_request_type() {
        let mut s = session();
        s.input_changed("8001015009087");
        s.component_online("showHolidays");
        assert!(s.relay().published.borrow().is_empty());

        s.show_holidays(HolidayRequestType::OnBirthday);
        let published = s.relay().published.borrow();
        assert_eq!(published.len(), 1);
        let RelayPayload::Holidays(payload) = &published[0] else {
            panic!("expected holiday payload");
        };
        assert_eq!(payload.request_type, HolidayRequestType::OnBirthday);
        assert_eq!(payload.citizenship, Citizenship::Citizen);
        assert_eq!(payload.query().unwrap().day, Some(1));
    }

    #[test]
    fn unknown_component_is_ignored() {
        let mut s = session();
        s.component_online("showIdComponents");
        s.component_online("showWeather");
        assert_eq!(s.active_widget(), Some(Widget::Components));
    }

    #[test]
    fn references_counted_per_action() {
        let mut s = session();
        s.input_changed("8001015009087");
        s.show_components();
        s.show_holidays(HolidayRequestType::InBirthYear);
        assert_eq!(s.last_reference_count(), Some(2));
        assert_eq!(s.sink().count("8001015009087"), Some(2));
    }

    #[test]
    fn keystrokes_do_not_touch_the_sink() {
        let mut s = session();
        for end in 1..=13 {
            s.input_changed(&"8001015009087"[..end]);
        }
        assert!(s.sink().is_empty());
    }

    #[test]
    fn sink_failure_is_kept_locally() {
        let mut s = IdNumberSession::new(decoder(), RecordingRelay::default(), FlakySink::default());
        s.input_changed("8001015009087");
        s.component_online("showIdComponents");

        s.sink().fail.set(true);
        s.show_components();
        assert!(matches!(
            s.last_sink_error(),
            Some(SinkError::Unavailable { .. })
        ));
        assert_eq!(s.last_reference_count(), None);
        // The relay still got its payload.
        assert_eq!(s.relay().published.borrow().len(), 2);

        s.sink().fail.set(false);
        s.show_components();
        assert!(s.last_sink_error().is_none());
        assert_eq!(s.last_reference_count(), Some(1));
    }
}
