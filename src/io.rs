use crate::model::{ScheduleEntry, ShiftCatalog, ShiftTypeDefinition};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::fs;
use std::path::Path;

/// Charge le catalogue selon l'extension : `.csv`, sinon JSON.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> anyhow::Result<ShiftCatalog> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        import_catalog_csv(path)
    } else {
        load_catalog_json(path)
    }
}

/// Catalogue JSON : `[{"type","startTime","endTime","allDayEvent"}, ...]`
pub fn load_catalog_json<P: AsRef<Path>>(path: P) -> anyhow::Result<ShiftCatalog> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_catalog_json(&data).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_catalog_json(data: &[u8]) -> anyhow::Result<ShiftCatalog> {
    let defs: Vec<ShiftTypeDefinition> = serde_json::from_slice(data)?;
    Ok(ShiftCatalog::new(defs)?)
}

/// Catalogue CSV : header `type,start_time,end_time[,all_day]`
pub fn import_catalog_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<ShiftCatalog> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let mut defs = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let shift_type = rec.get(0).context("missing type")?;
        let start = rec.get(1).context("missing start_time")?;
        let end = rec.get(2).context("missing end_time")?;
        let all_day = match rec.get(3) {
            Some(flag) if !flag.is_empty() => parse_bool(flag)
                .with_context(|| format!("invalid all_day value for type {shift_type}"))?,
            _ => false,
        };
        defs.push(ShiftTypeDefinition::new(shift_type, start, end, all_day));
    }
    Ok(ShiftCatalog::new(defs)?)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "si" | "vero" => Ok(true),
        "false" | "0" | "no" | "n" | "falso" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Planning sauvegardé : lignes `YYYY-MM-DD,type` sans en-tête.
pub fn import_schedule_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ScheduleEntry>> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_schedule(rdr)
}

pub fn parse_schedule_csv(data: &str) -> anyhow::Result<Vec<ScheduleEntry>> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_bytes());
    read_schedule(rdr)
}

fn read_schedule<R: std::io::Read>(mut rdr: csv::Reader<R>) -> anyhow::Result<Vec<ScheduleEntry>> {
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        if rec.iter().all(str::is_empty) {
            continue;
        }
        let raw_date = rec.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .with_context(|| format!("line {}: invalid date {raw_date:?}", line + 1))?;
        let shift_type = rec
            .get(1)
            .filter(|s| !s.is_empty())
            .with_context(|| format!("line {}: missing shift type", line + 1))?;
        out.push(ScheduleEntry::new(date, shift_type));
    }
    Ok(out)
}
