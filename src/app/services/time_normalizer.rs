//! Civil time to UTC normalization
//!
//! Converts a wall-clock timestamp in a named time zone to the UTC `HH:MM`
//! used by the reports. Offsets come from the time zone database, so
//! daylight-saving transitions are resolved from the zone's real rules.
//! Failures never propagate: they produce [`ObservationTime::Invalid`].

use crate::app::models::ObservationTime;
use crate::error::{AtisError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use jiff::civil;
use jiff::tz::TimeZone;
use tracing::warn;

/// Wall-clock date and time components as read from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CivilStamp {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    fn to_civil(self) -> Result<civil::DateTime> {
        let out_of_range = |what: &str| {
            AtisError::time_conversion(format!("{} out of range in {:?}", what, self))
        };

        let year = i16::try_from(self.year).map_err(|_| out_of_range("year"))?;
        let month = i8::try_from(self.month).map_err(|_| out_of_range("month"))?;
        let day = i8::try_from(self.day).map_err(|_| out_of_range("day"))?;
        let hour = i8::try_from(self.hour).map_err(|_| out_of_range("hour"))?;
        let minute = i8::try_from(self.minute).map_err(|_| out_of_range("minute"))?;

        let date = civil::Date::new(year, month, day)
            .map_err(|e| AtisError::time_conversion(format!("invalid date: {}", e)))?;
        let time = civil::Time::new(hour, minute, 0, 0)
            .map_err(|e| AtisError::time_conversion(format!("invalid time: {}", e)))?;

        Ok(date.to_datetime(time))
    }
}

/// UTC time for a wall-clock stamp in `zone`, or the invalid sentinel
pub fn to_utc(stamp: CivilStamp, zone: &str) -> ObservationTime {
    match resolve_utc(stamp, zone) {
        Ok(time) => time,
        Err(error) => {
            warn!("Falling back to invalid observation time: {}", error);
            ObservationTime::Invalid
        }
    }
}

/// UTC time for a wall-clock stamp in `zone`.
///
/// Local times skipped by a spring-forward transition are moved forward by
/// the gap; repeated times in autumn resolve to the earlier instant.
pub fn resolve_utc(stamp: CivilStamp, zone: &str) -> Result<ObservationTime> {
    let (hour, minute) = resolve_utc_parts(stamp, zone)?;
    ObservationTime::utc(hour, minute)
        .ok_or_else(|| AtisError::time_conversion(format!("unrepresentable time for {:?}", stamp)))
}

/// UTC offset in seconds observed in `zone` at the given wall-clock stamp
pub fn utc_offset_seconds(stamp: CivilStamp, zone: &str) -> Result<i32> {
    let zoned = zoned(stamp, zone)?;
    Ok(zoned.offset().seconds())
}

/// Parse provider date and time text, then convert to UTC.
///
/// Dates may be `DD/MM/YYYY` or `YYYY-MM-DD`; times `HH:MM` or `HH:MM:SS`.
pub fn parse_local(date_text: &str, time_text: &str, zone: &str) -> ObservationTime {
    match parse_stamp(date_text, time_text) {
        Ok(stamp) => to_utc(stamp, zone),
        Err(error) => {
            warn!("Falling back to invalid observation time: {}", error);
            ObservationTime::Invalid
        }
    }
}

/// Format an instant that is already in UTC
pub fn from_utc(instant: DateTime<Utc>) -> ObservationTime {
    ObservationTime::utc(instant.hour() as u8, instant.minute() as u8)
        .unwrap_or(ObservationTime::Invalid)
}

/// Wall-clock stamp of an instant as seen in `zone`
pub fn civil_in_zone(instant: DateTime<Utc>, zone: &str) -> Result<CivilStamp> {
    let tz = time_zone(zone)?;
    let timestamp = jiff::Timestamp::from_second(instant.timestamp())
        .map_err(|e| AtisError::time_conversion(e.to_string()))?;
    let local = timestamp.to_zoned(tz);
    Ok(CivilStamp::new(
        i32::from(local.year()),
        local.month() as u32,
        local.day() as u32,
        local.hour() as u32,
        local.minute() as u32,
    ))
}

fn parse_stamp(date_text: &str, time_text: &str) -> Result<CivilStamp> {
    let date_text = date_text.trim();
    let time_text = time_text.trim();

    let date = NaiveDate::parse_from_str(date_text, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(date_text, "%Y-%m-%d"))
        .map_err(|e| AtisError::time_conversion(format!("invalid date '{}': {}", date_text, e)))?;
    let time = NaiveTime::parse_from_str(time_text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_text, "%H:%M:%S"))
        .map_err(|e| AtisError::time_conversion(format!("invalid time '{}': {}", time_text, e)))?;

    Ok(CivilStamp::new(
        date.year(),
        date.month(),
        date.day(),
        time.hour(),
        time.minute(),
    ))
}

fn time_zone(zone: &str) -> Result<TimeZone> {
    TimeZone::get(zone)
        .map_err(|e| AtisError::time_conversion(format!("unknown time zone '{}': {}", zone, e)))
}

fn zoned(stamp: CivilStamp, zone: &str) -> Result<jiff::Zoned> {
    let tz = time_zone(zone)?;
    let local = stamp.to_civil()?;
    tz.to_zoned(local).map_err(|e| {
        AtisError::time_conversion(format!("cannot place {:?} in {}: {}", stamp, zone, e))
    })
}

fn resolve_utc_parts(stamp: CivilStamp, zone: &str) -> Result<(u8, u8)> {
    let utc = zoned(stamp, zone)?.with_time_zone(TimeZone::UTC);
    Ok((utc.hour() as u8, utc.minute() as u8))
}
