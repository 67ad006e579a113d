//! # Widget Relay
//!
//! Payload contract between the ID input field and the display widgets
//! that subscribe to it.
//!
//! A widget announces itself by name when it comes online. From then on the
//! input field publishes a payload shaped for that widget whenever the user
//! asks to see it: the full [`IdComponents`] for the components widget, or a
//! reduced [`HolidayPayload`] for the holiday widget.
//!
//! Delivery is somebody else's job. [`MessageRelay`] is the capability the
//! caller injects; publishing is fire-and-forget and the relay only ever
//! receives owned snapshots.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::components::{Citizenship, Gender, IdComponents};
use crate::date::BirthDate;
use crate::holidays::{HolidayQuery, HolidayRequestType};

/// Display widgets that can subscribe to the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Widget {
    /// Shows the decoded fields.
    #[serde(rename = "showIdComponents")]
    Components,
    /// Shows holidays around the birth date.
    #[serde(rename = "showHolidays")]
    Holidays,
}

impl Widget {
    /// Look up a widget by the name it announces itself with.
    pub fn from_component_name(name: &str) -> Option<Self> {
        match name {
            "showIdComponents" => Some(Self::Components),
            "showHolidays" => Some(Self::Holidays),
            _ => None,
        }
    }

    /// The name the widget announces itself with.
    pub fn component_name(&self) -> &'static str {
        match self {
            Self::Components => "showIdComponents",
            Self::Holidays => "showHolidays",
        }
    }
}

/// Announcement sent by a widget when it comes online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOnline {
    #[serde(rename = "ComponentName")]
    pub component_name: String,
}

/// Reduced payload for the holiday widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayPayload {
    pub date: BirthDate,
    pub gender: Gender,
    pub citizenship: Citizenship,
    #[serde(rename = "checksumCorrect")]
    pub checksum_valid: bool,
    #[serde(rename = "RequestType")]
    pub request_type: HolidayRequestType,
    #[serde(rename = "headerText")]
    pub header_text: String,
}

impl HolidayPayload {
    /// Snapshot the fields the holiday widget needs.
    pub fn new(components: &IdComponents, request_type: HolidayRequestType) -> Self {
        Self {
            date: components.date,
            gender: components.gender,
            citizenship: components.citizenship,
            checksum_valid: components.checksum_valid,
            request_type,
            header_text: request_type.header_text().to_string(),
        }
    }

    /// The backend query the holiday widget should issue, if the date is valid.
    pub fn query(&self) -> Option<HolidayQuery> {
        HolidayQuery::for_birth_date(self.date, self.request_type)
    }
}

/// Message published to the active widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayPayload {
    /// Everything decoded, for the components widget.
    Components(IdComponents),
    /// Date and status fields plus the requested lookup, for the holiday widget.
    Holidays(HolidayPayload),
}

impl RelayPayload {
    /// Shape a payload for `widget`.
    ///
    /// The holiday widget needs to know which lookup was requested; without
    /// one there is nothing to send and `None` is returned.
    pub fn for_widget(
        widget: Widget,
        components: &IdComponents,
        request_type: Option<HolidayRequestType>,
    ) -> Option<Self> {
        match widget {
            Widget::Components => Some(Self::Components(components.clone())),
            Widget::Holidays => {
                request_type.map(|request| Self::Holidays(HolidayPayload::new(components, request)))
            }
        }
    }
}

/// Fire-and-forget publisher to the subscribed widgets.
pub trait MessageRelay {
    /// Publish a payload. Delivery failures are the relay's concern.
    fn publish(&self, payload: RelayPayload);
}

/// Relay backed by an in-process channel.
#[derive(Debug, Clone)]
pub struct ChannelRelay {
    sender: Sender<RelayPayload>,
}

impl ChannelRelay {
    /// Publish into `sender`.
    pub fn new(sender: Sender<RelayPayload>) -> Self {
        Self { sender }
    }
}

impl MessageRelay for ChannelRelay {
    fn publish(&self, payload: RelayPayload) {
        if self.sender.send(payload).is_err() {
            tracing::warn!("relay receiver dropped; payload discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::mpsc;

    fn components() -> IdComponents {
        IdComponents {
            length: 13,
            date: BirthDate::Valid(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()),
            gender: Gender::Male,
            citizenship: Citizenship::Citizen,
            checksum_valid: true,
            valid: true,
        }
    }

    #[test]
    fn widget_names_round_trip() {
        for widget in [Widget::Components, Widget::Holidays] {
            assert_eq!(Widget::from_component_name(widget.component_name()), Some(widget));
        }
        assert_eq!(Widget::from_component_name("showWeather"), None);
    }

    #[test]
    fn components_widget_gets_everything() {
        let payload = RelayPayload::for_widget(Widget::Components, &components(), None).unwrap();
        assert_eq!(payload, RelayPayload::Components(components()));
    }

    #[test]
    fn holiday_widget_needs_request_type() {
        assert!(RelayPayload::for_widget(Widget::Holidays, &components(), None).is_none());

        let payload = RelayPayload::for_widget(
            Widget::Holidays,
            &components(),
            Some(HolidayRequestType::InBirthYear),
        )
        .unwrap();
        let RelayPayload::Holidays(h) = payload else {
            panic!("expected holiday payload");
        };
        assert_eq!(h.citizenship, Citizenship::Citizen);
        assert_eq!(h.header_text, "Holidays in year of your birth");
        assert_eq!(h.query().unwrap().year, 1980);
    }

    #[test]
    fn holiday_payload_wire_shape() {
        let payload = HolidayPayload::new(&components(), HolidayRequestType::OnBirthday);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "date": "1980-01-01",
                "gender": "Male",
                "citizenship": "SA Citizen",
                "checksumCorrect": true,
                "RequestType": "ShowHolidaysOnDay",
                "headerText": "Holidays on your birthday",
            })
        );
    }

    #[test]
    fn untagged_payload_deserializes_either_shape() {
        let json = serde_json::to_string(&RelayPayload::Components(components())).unwrap();
        let back: RelayPayload = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, RelayPayload::Components(_)));

        let json = serde_json::to_string(&RelayPayload::Holidays(HolidayPayload::new(
            &components(),
            HolidayRequestType::InBirthMonth,
        )))
        .unwrap();
        let back: RelayPayload = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, RelayPayload::Holidays(_)));
    }

    #[test]
    fn component_online_wire_name() {
        let msg: ComponentOnline =
            serde_json::from_str(r#"{"ComponentName":"showHolidays"}"#).unwrap();
        assert_eq!(Widget::from_component_name(&msg.component_name), Some(Widget::Holidays));
    }

    #[test]
    fn channel_relay_delivers_and_tolerates_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        let relay = ChannelRelay::new(tx);
        relay.publish(RelayPayload::Components(components()));
        assert_eq!(rx.recv().unwrap(), RelayPayload::Components(components()));

        drop(rx);
        relay.publish(RelayPayload::Components(components()));
    }
}
