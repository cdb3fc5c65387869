use checkin_core::{check_in_status, lead_hours_to_minutes};

pub fn run(time: &str, lead_hours: f64, international: bool, json: bool) -> anyhow::Result<()> {
    let now = chrono::Local::now().naive_local();
    let info = check_in_status(time, lead_hours_to_minutes(lead_hours), international, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.status_text);
        if let Some(countdown) = &info.countdown_text {
            println!("{countdown}");
        }
    }
    Ok(())
}
