use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

impl DatePart {
    fn width(self) -> usize {
        match self {
            DatePart::Day | DatePart::Month => 2,
            DatePart::Year => 4,
        }
    }
}

/// Segment editor for a `dd/mm/yyyy` date.
///
/// The value is only `Some` once all three parts form a real calendar date.
#[derive(Debug, Clone)]
pub struct DateInputState {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
    pub editing: bool,
    pub date_part: DatePart,
    pub current_date_input: String,
}

impl DateInputState {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            day: date.map(|d| d.day()),
            month: date.map(|d| d.month()),
            year: date.map(|d| d.year()),
            editing: false,
            date_part: DatePart::Day,
            current_date_input: String::new(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.date_part = DatePart::Day;
            self.current_date_input.clear();
        }
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Day => DatePart::Month,
            DatePart::Month => DatePart::Year,
            DatePart::Year => DatePart::Day,
        };
        self.current_date_input.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Day => DatePart::Year,
            DatePart::Month => DatePart::Day,
            DatePart::Year => DatePart::Month,
        };
        self.current_date_input.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.current_date_input.push(c);
                if self.current_date_input.len() == self.date_part.width() {
                    self.commit_part();
                    self.next_date_part();
                }
            }
            KeyCode::Backspace => {
                if self.current_date_input.pop().is_none() {
                    self.clear_part();
                }
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    fn commit_part(&mut self) {
        let typed = &self.current_date_input;
        match self.date_part {
            DatePart::Day => {
                if let Ok(day) = typed.parse::<u32>() {
                    if (1..=31).contains(&day) {
                        self.day = Some(day);
                    }
                }
            }
            DatePart::Month => {
                if let Ok(month) = typed.parse::<u32>() {
                    if (1..=12).contains(&month) {
                        self.month = Some(month);
                    }
                }
            }
            DatePart::Year => {
                if let Ok(year) = typed.parse::<i32>() {
                    if (1900..=2100).contains(&year) {
                        self.year = Some(year);
                    }
                }
            }
        }
    }

    fn clear_part(&mut self) {
        match self.date_part {
            DatePart::Day => self.day = None,
            DatePart::Month => self.month = None,
            DatePart::Year => self.year = None,
        }
    }

    pub fn get_display_string(&self) -> String {
        let mut day = self.day.map(|d| format!("{:02}", d)).unwrap_or("dd".into());
        let mut month = self.month.map(|m| format!("{:02}", m)).unwrap_or("mm".into());
        let mut year = self.year.map(|y| format!("{:04}", y)).unwrap_or("aaaa".into());

        if self.editing {
            let current = format!("[{}]", self.current_date_input);
            match self.date_part {
                DatePart::Day => day = current,
                DatePart::Month => month = current,
                DatePart::Year => year = current,
            }
        }

        format!("{}/{}/{}", day, month, year)
    }
}
