use {super::*, std::fmt::Write};

/// identifying information about the host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SystemInfo {
    pub os: String,
    pub kernel: String,
    /// uptime, formatted as `Nd Nh Nm`.
    pub uptime: String,
    pub cpu_model: String,
    /// the machine vendor and product. empty if neither is known.
    pub machine_model: String,
}

/// returns identifying information about the host, with placeholders for anything unknown.
pub fn system_info(source: &impl Source) -> SystemInfo {
    let mut info = SystemInfo::default();

    if let Some(os) = read(source, "/etc/os-release").and_then(|r| pretty_name(&r)) {
        info.os = os;
    }

    match source.kernel_release() {
        Ok(kernel) => info.kernel = kernel,
        Err(error) => debug!(%error, "could not query kernel release"),
    }

    if let Some(uptime) = read(source, "/proc/uptime").and_then(|u| uptime(&u)) {
        info.uptime = uptime;
    }

    if let Some(model) = read(source, "/proc/cpuinfo").and_then(|c| cpu_model(&c)) {
        info.cpu_model = model;
    }

    let first_line = |path: &str| {
        read(source, path)
            .and_then(|s| s.lines().next().map(|l| l.trim().to_owned()))
            .unwrap_or_default()
    };
    let vendor = first_line("/sys/class/dmi/id/sys_vendor");
    let product = first_line("/sys/class/dmi/id/product_name");
    info.machine_model = [vendor, product]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    info
}

/// finds `PRETTY_NAME` in `os-release(5)` contents, stripping surrounding quotes.
fn pretty_name(os_release: &str) -> Option<String> {
    let value = os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))?
        .trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    Some(value.to_owned())
}

/// formats the first field of `/proc/uptime` as days, hours, and minutes.
fn uptime(uptime: &str) -> Option<String> {
    let seconds = uptime.split_whitespace().next()?.parse::<f64>().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    let seconds = seconds as u64;
    let (days, hours, mins) = (seconds / 86400, (seconds % 86400) / 3600, (seconds % 3600) / 60);

    let mut out = String::new();
    write!(out, "{days}d {hours}h {mins}m").ok()?;
    Some(out)
}

/// finds the first `model name` in `/proc/cpuinfo`.
fn cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("model name"))
        .find_map(|line| line.split_once(':'))
        .map(|(_, model)| model.trim().to_owned())
}

// === impl SystemInfo ===

impl SystemInfo {
    /// returns the machine model, or a generic label when it is unknown.
    pub fn machine_label(&self) -> &str {
        match self.machine_model.trim() {
            "" => "Generic System",
            model => model,
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            os: "Unknown OS".to_owned(),
            kernel: "Unknown Kernel".to_owned(),
            uptime: "0m".to_owned(),
            cpu_model: "Unknown CPU".to_owned(),
            machine_model: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_name_strips_quotes() {
        let os_release = "NAME=\"Ubuntu\"\nPRETTY_NAME=\"Ubuntu 24.04.1 LTS\"\nID=ubuntu\n";
        assert_eq!(pretty_name(os_release).as_deref(), Some("Ubuntu 24.04.1 LTS"));
    }

    #[test]
    fn pretty_name_unquoted() {
        assert_eq!(
            pretty_name("PRETTY_NAME=Alpine\n").as_deref(),
            Some("Alpine")
        );
        assert_eq!(pretty_name("NAME=Alpine\n"), None);
    }

    #[test]
    fn uptime_in_days_hours_minutes() {
        // 2 days, 3 hours, 4 minutes, 5 seconds.
        let seconds = 2 * 86400 + 3 * 3600 + 4 * 60 + 5;
        let contents = format!("{seconds}.42 1234.00\n");
        assert_eq!(uptime(&contents).as_deref(), Some("2d 3h 4m"));
        assert_eq!(uptime("garbage"), None);
    }

    #[test]
    fn first_cpu_model_wins() {
        let cpuinfo = "processor\t: 0\nmodel name\t: AMD EPYC 7763\nprocessor\t: 1\nmodel name\t: Other\n";
        assert_eq!(cpu_model(cpuinfo).as_deref(), Some("AMD EPYC 7763"));
    }

    #[test]
    fn machine_label_falls_back() {
        let info = SystemInfo::default();
        assert_eq!(info.machine_label(), "Generic System");
    }
}
