use chrono::NaiveDate;

pub const BACKUP_PREFIX: &str = "budget-tracker-backup";

/// File name for an export taken on `date`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}-{}.json", BACKUP_PREFIX, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date");
        assert_eq!(backup_file_name(date), "budget-tracker-backup-2026-03-07.json");
    }
}
