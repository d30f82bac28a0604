// src/common/format.rs

use chrono::{DateTime, Utc};

pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

pub fn format_date_time(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// Exibição relativa usada nas listas ("il y a 5 min", "hier"...).
/// Acima de uma semana, ou no futuro, cai para a data absoluta.
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - ts;

    if elapsed.num_seconds() < 0 {
        return format_date(ts);
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    match (minutes, hours, days) {
        (0, _, _) => "à l'instant".to_string(),
        (m, 0, _) => format!("il y a {} min", m),
        (_, h, 0) => format!("il y a {} h", h),
        (_, _, 1) => "hier".to_string(),
        (_, _, d) if d < 7 => format!("il y a {} jours", d),
        _ => format_date(ts),
    }
}
