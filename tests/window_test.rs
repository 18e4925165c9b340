use chrono::{Duration, TimeZone, Utc};
use releasify::{
    errors::ReleasifyError,
    types::ReleaseDatePrecision::{Day, Month, Year},
    window::{ReleaseWindow, SECONDS_PER_DAY, release_timestamp},
};

#[test]
fn test_day_precision_is_utc_midnight() {
    let ts = release_timestamp("2024-03-09", Day).unwrap().unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap());
}

#[test]
fn test_month_precision_means_first_of_month() {
    let ts = release_timestamp("2024-03", Month).unwrap().unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_year_precision_means_january_first() {
    let ts = release_timestamp("2024", Year).unwrap().unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_window_boundary_is_exclusive() {
    let window = ReleaseWindow::days(7);
    let released = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let boundary = released + Duration::seconds(7 * SECONDS_PER_DAY);

    assert!(window.contains("2024-06-01", Day, boundary - Duration::seconds(1)).unwrap());
    assert!(!window.contains("2024-06-01", Day, boundary).unwrap());
    assert!(!window.contains("2024-06-01", Day, boundary + Duration::seconds(1)).unwrap());
}

#[test]
fn test_release_on_the_same_day_is_recent() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap();
    assert!(ReleaseWindow::days(1).contains("2024-06-01", Day, now).unwrap());
}

#[test]
fn test_future_release_is_recent() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    assert!(ReleaseWindow::days(7).contains("2024-06-20", Day, now).unwrap());
    assert!(ReleaseWindow::days(0).contains("2024-06-20", Day, now).unwrap());
}

#[test]
fn test_zero_day_window_excludes_past_releases() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    assert!(!ReleaseWindow::days(0).contains("2024-06-01", Day, now).unwrap());
}

#[test]
fn test_coarse_precision_uses_start_of_period() {
    // 2024-06 starts 14 days before now, 2024 starts months before now
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
    assert!(!ReleaseWindow::days(7).contains("2024-06", Month, now).unwrap());
    assert!(ReleaseWindow::days(15).contains("2024-06", Month, now).unwrap());
    assert!(!ReleaseWindow::days(30).contains("2024", Year, now).unwrap());
}

#[test]
fn test_out_of_range_year_is_never_recent() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
    let window = ReleaseWindow::days(u32::MAX);

    assert!(release_timestamp("300000", Year).unwrap().is_none());
    assert!(!window.contains("300000", Year, now).unwrap());
    assert!(!window.contains("99999999999999999999-01-01", Day, now).unwrap());
    assert!(release_timestamp("300000-01", Month).unwrap().is_none());
}

#[test]
fn test_malformed_dates_are_errors() {
    for (date, precision) in [
        ("2024-06", Day),
        ("2024-06-01", Month),
        ("2024-06", Year),
        ("2024-13-01", Day),
        ("2023-02-29", Day),
        ("24-xx", Month),
        ("", Year),
        ("2024-06-01T00:00", Day),
        ("2024/06/01", Day),
    ] {
        let err = release_timestamp(date, precision).unwrap_err();
        assert!(
            matches!(err, ReleasifyError::InvalidReleaseDate { .. }),
            "{date} ({precision}) should be rejected"
        );
    }
}

#[test]
fn test_default_window_is_a_week() {
    let window = ReleaseWindow::default();
    assert_eq!(window.len_days(), 7);
    assert_eq!(window.as_seconds(), 7 * 86_400);
}
