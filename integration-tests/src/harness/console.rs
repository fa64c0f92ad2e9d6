use hitwatch_core::pipeline::Console;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for stdout.
#[derive(Clone, Default)]
pub struct CapturedConsole {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedConsole {
    pub fn console(&self) -> Console {
        Console::from_writer(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Counts summed over every report block in a captured output.
///
/// Real-time tests cannot control which window a line lands in, so they
/// compare totals instead of exact blocks.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReportTotals {
    pub blocks: usize,
    pub sections: BTreeMap<String, u64>,
    pub codes: BTreeMap<u16, u64>,
    /// Sum of every `Transmitted` figure. Equals the byte total when the
    /// report interval is one second.
    pub bytes_per_sec: u64,
}

impl ReportTotals {
    pub fn from_output(output: &str) -> Self {
        #[derive(Clone, Copy)]
        enum Part {
            None,
            Requests,
            Responses,
            Transmitted,
        }

        let mut totals = ReportTotals::default();
        let mut part = Part::None;

        for line in output.lines() {
            if !line.is_empty() && line.chars().all(|c| c == '-') {
                totals.blocks += 1;
                part = Part::None;
                continue;
            }

            match line {
                "Requests:" => part = Part::Requests,
                "Responses:" => part = Part::Responses,
                "Transmitted:" => part = Part::Transmitted,
                "" => part = Part::None,
                _ if matches!(part, Part::Transmitted) => {
                    if let Some(rate) = line.trim().strip_suffix("B/s") {
                        totals.bytes_per_sec += rate.parse::<u64>().unwrap_or(0);
                    }
                    part = Part::None;
                }
                _ => {
                    let mut it = line.split_whitespace();
                    let (Some(count), Some(key)) = (it.next(), it.next()) else {
                        continue;
                    };
                    let Ok(count) = count.parse::<u64>() else {
                        continue;
                    };
                    match part {
                        Part::Requests => {
                            *totals.sections.entry(key.to_string()).or_insert(0) += count;
                        }
                        Part::Responses => {
                            if let Ok(code) = key.parse::<u16>() {
                                *totals.codes.entry(code).or_insert(0) += count;
                            }
                        }
                        Part::None | Part::Transmitted => {}
                    }
                }
            }
        }

        totals
    }
}
