//! Text rendering for forecasts, sync results and notifications

use application::{
    DayNavigator, LocalNotification, SyncOutcome, entries_for_day, format_long_date,
    format_short_date, icon_url, narrate_day, narrate_entry, summarize,
};
use domain::ForecastSnapshot;

/// Shown before a forecast loaded from the device cache
pub const OFFLINE_BANNER: &str = "Carregando dados salvos localmente.";

/// Shown when the device cache is empty
pub const NO_OFFLINE_DATA: &str = "Nenhum dado local encontrado.";

/// Render a forecast with its day list, narrating day `day`
///
/// A `day` past the last available day selects the last one.
#[must_use]
pub fn render_forecast(snapshot: &ForecastSnapshot, day: usize, with_entries: bool) -> String {
    let city = &snapshot.city;
    let days = summarize(snapshot);

    let mut out = format!("📍 {}, {}\n", city.name, city.country);

    if days.is_empty() {
        out.push_str("Sem previsões disponíveis.\n");
        return out;
    }

    for (i, summary) in days.iter().enumerate() {
        let condition = summary
            .condition
            .as_ref()
            .map_or("-", |c| c.description.as_str());
        out.push_str(&format!(
            "  [{i}] {}  {:.1}° / {:.1}° / {:.1}°  {condition}\n",
            format_short_date(summary.date),
            summary.temp_min,
            summary.temp_avg,
            summary.temp_max,
        ));
    }

    let mut navigator = DayNavigator::new(days);
    while navigator.position() < day && navigator.next_day() {}

    let Some(selected) = navigator.current() else {
        return out;
    };

    out.push('\n');
    out.push_str(&format!("🗓️ {}\n", format_long_date(selected.date)));
    out.push_str(&narrate_day(&city.name, selected));
    out.push('\n');

    if let Some(condition) = &selected.condition {
        out.push_str(&format!("{}\n", icon_url(&condition.icon)));
    }

    if with_entries {
        let offset = city.utc_offset();
        for entry in entries_for_day(snapshot, selected.date) {
            out.push('\n');
            out.push_str(&narrate_entry(entry, offset));
            out.push('\n');
        }
    }

    let mut hints = Vec::new();
    if navigator.has_previous() {
        hints.push(format!("--day {} para o dia anterior", navigator.position() - 1));
    }
    if navigator.has_next() {
        hints.push(format!("--day {} para o próximo dia", navigator.position() + 1));
    }
    if !hints.is_empty() {
        out.push_str(&format!("\n({})\n", hints.join(", ")));
    }

    out
}

/// One-line summary of a sync run
#[must_use]
pub fn render_outcome(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Completed {
            alerts,
            scheduled,
            suppressed,
        } => format!(
            "Sincronização concluída: {alerts} alerta(s), {scheduled} notificado(s), {suppressed} repetido(s)."
        ),
        SyncOutcome::Failed(reason) => format!("Falha na sincronização: {reason}"),
    }
}

/// Render a delivered notification
#[must_use]
pub fn render_notification(notification: &LocalNotification) -> String {
    format!(
        "{}\n{}\n→ ceu-azul search \"{}\"",
        notification.title, notification.body, notification.city_name
    )
}
