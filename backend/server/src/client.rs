//! # Scanner Client Specifications
//!
//! Client logic/relevant structures. Documentation only.
//!
//! ## Overall Payloads
//!
//! JSON, camelCase keys, between the scanner page and `/api`.
//!
//! ### Check-in
//! To backend
//! - `qrData`: decoded QR text, the participant id
//! - `checkInTime`: ISO 8601 timestamp from the scanner clock, server time if omitted
//! - `isDemoMode`: mode the scanner is in, the server's mode if omitted
//! - `activityName`: activity shown on the scanner, the stored one if omitted
//!
//! From backend
//! - `message`: text to show and read out
//! - `outcome`: `Accepted`, `Duplicate`, `Invalid` or `NotFound`
//! - `participant`, `checkInCount`, `multipleCheckIns`: only for valid participants
//! - `dailyCheckInCount`, `totalPeople`, `activityName`: always present, refresh the header with them
//!
//! ### Roster
//! - Upload: multipart form, single `file` field, `.xlsx` or `.xls` content type
//! - Import: `{ "participants": [{ "id", "name", "englishName", "email", "voicePart", "status" }] }`
//! - A row without a status rejects the whole roster, the previous one stays in place
//!
//! ### Export
//! - `GET /api/export-checkins` returns `checkins.xlsx`, save it as a download
//!
//!
//!
//! ## Flow
//!
//! - Operator uploads the roster and sets the activity name before doors open
//! - Scanner polls `/api/scan-entries` and `/api/daily-check-in-count` to keep its side panel fresh
//! - Demo mode for rehearsals, switch to production before the first real guest
//! - After the event, export the report, then clear check-in records for the next session
//!
//!
//!
//! ## Sounds
//!
//! - Accepted: success chime
//! - Duplicate: soft double beep, the participant may still enter
//! - Invalid and NotFound: error tone, send the guest to the help desk
