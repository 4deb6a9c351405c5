//! ICS file generation.

use crate::calendar::{CalendarDocument, CalendarMetadata};
use crate::event::CalendarEvent;
use chrono::NaiveDate;
use icalendar::{Calendar, Component, Property, ValueType};

/// Generate .ics content for a whole calendar document
pub fn generate_ics(document: &CalendarDocument) -> String {
    // Start empty so the header comes from the document's metadata
    let mut cal = Calendar::empty();
    append_header(&mut cal, &document.metadata);

    for event in &document.events {
        cal.push(to_ics_event(event));
    }

    cal.done().to_string()
}

fn to_ics_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);
    ics_event.description(&event.description);

    // DTSTAMP - required by RFC 5545
    let dtstamp = event.stamp.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    // Whole-day event with zero duration
    add_date_property(&mut ics_event, "DTSTART", event.date);
    add_date_property(&mut ics_event, "DTEND", event.date);

    ics_event.add_property("STATUS", event.status.as_ics_str());
    ics_event.add_property("TRANSP", event.transparency.as_ics_str());

    ics_event.done()
}

/// VERSION, PRODID and CALSCALE as regular properties, folded and escaped
/// like any other
fn append_header(cal: &mut Calendar, metadata: &CalendarMetadata) {
    cal.append_property(Property::new("VERSION", &metadata.version));
    cal.append_property(Property::new("PRODID", &metadata.prodid));
    cal.append_property(Property::new("CALSCALE", &metadata.calscale));
}

/// Add a DATE-valued property (`NAME;VALUE=DATE:YYYYMMDD`)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
