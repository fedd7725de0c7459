use crate::calendar::{MonthGrid, WEEKDAY_HEADERS};
use crate::models::UserProfile;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn error_block(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="error-message">{}</div>"#, escape(message))
    }
}

pub fn render_login(error: &str, remembered_email: &str) -> String {
    LOGIN_HTML
        .replace("{{SHARED_CSS}}", SHARED_CSS)
        .replace("{{AUTH_CSS}}", AUTH_CSS)
        .replace("{{ERROR_BLOCK}}", &error_block(error))
        .replace("{{EMAIL}}", &escape(remembered_email))
        .replace(
            "{{REMEMBER_CHECKED}}",
            if remembered_email.is_empty() { "" } else { "checked" },
        )
}

pub fn render_register(error: &str) -> String {
    REGISTER_HTML
        .replace("{{SHARED_CSS}}", SHARED_CSS)
        .replace("{{AUTH_CSS}}", AUTH_CSS)
        .replace("{{ERROR_BLOCK}}", &error_block(error))
}

pub fn render_dashboard(user: &UserProfile, grid: &MonthGrid) -> String {
    let name = if user.name.is_empty() { "User" } else { user.name.as_str() };
    let role = if user.position.is_empty() {
        "Employee"
    } else {
        user.position.as_str()
    };
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string());

    DASHBOARD_HTML
        .replace("{{SHARED_CSS}}", SHARED_CSS)
        .replace("{{USER_NAME}}", &escape(name))
        .replace("{{USER_ROLE}}", &escape(role))
        .replace("{{USER_INITIAL}}", &escape(&initial))
        .replace("{{CALENDAR}}", &calendar_html(grid))
}

/// Full redraw of the calendar container: header with month navigation,
/// weekday row, then the 42 cells.
pub fn calendar_html(grid: &MonthGrid) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(concat!(
        r#"<div class="calendar-header">"#,
        r#"<form method="post" action="/calendar/prev"><button class="calendar-nav-btn" type="submit">&lsaquo;</button></form>"#,
    ));
    html.push_str(&format!(
        r#"<div class="calendar-month-year">{} {}</div>"#,
        grid.month_label, grid.year
    ));
    html.push_str(concat!(
        r#"<form method="post" action="/calendar/next"><button class="calendar-nav-btn" type="submit">&rsaquo;</button></form>"#,
        r#"</div><div class="calendar-weekdays">"#,
    ));
    for day in WEEKDAY_HEADERS {
        html.push_str(&format!(r#"<div class="calendar-weekday">{day}</div>"#));
    }
    html.push_str(r#"</div><div class="calendar-days">"#);
    for cell in &grid.cells {
        match cell.day {
            None => html.push_str(r#"<div class="calendar-day other-month"></div>"#),
            Some(day) => {
                let mut classes = String::from("calendar-day");
                if cell.off_day {
                    classes.push_str(" off-day");
                }
                if cell.today {
                    classes.push_str(" today");
                }
                html.push_str(&format!(r#"<div class="{classes}">{day}</div>"#));
            }
        }
    }
    html.push_str("</div>");
    html
}

const SHARED_CSS: &str = r##"
    :root {
      --bg: #10141c;
      --panel: #1a2130;
      --panel-soft: #212a3d;
      --ink: #e8ecf4;
      --muted: #8d97ab;
      --accent: #66ff00;
      --danger: #ff5d5d;
      --border: rgba(255, 255, 255, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
    }

    button {
      cursor: pointer;
      font: inherit;
    }

    input {
      width: 100%;
      padding: 11px 12px;
      border-radius: 10px;
      border: 1px solid var(--border);
      background: var(--panel-soft);
      color: var(--ink);
      font-size: 0.95rem;
    }

    .error-message {
      background: rgba(255, 93, 93, 0.12);
      border: 1px solid rgba(255, 93, 93, 0.4);
      color: var(--danger);
      border-radius: 10px;
      padding: 10px 12px;
      font-size: 0.9rem;
    }
"##;

const AUTH_CSS: &str = r##"
    body {
      display: grid;
      place-items: center;
      padding: 24px;
    }

    .auth-card {
      width: min(380px, 100%);
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 32px 28px;
      display: grid;
      gap: 16px;
    }

    .auth-card h1 {
      margin: 0;
      font-size: 1.5rem;
    }

    .auth-card .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .auth-card label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .remember-row {
      display: flex;
      align-items: center;
      gap: 8px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .remember-row input {
      width: auto;
    }

    .submit-btn {
      border: none;
      border-radius: 10px;
      padding: 12px;
      background: var(--accent);
      color: #10141c;
      font-weight: 600;
    }

    .switch-link {
      font-size: 0.85rem;
      color: var(--muted);
      text-align: center;
    }

    .switch-link a {
      color: var(--accent);
    }
"##;

const LOGIN_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sign in - Attendance</title>
  <style>
{{SHARED_CSS}}
{{AUTH_CSS}}
  </style>
</head>
<body>
  <main class="auth-card">
    <h1>Welcome back</h1>
    <p class="subtitle">Sign in to track your attendance.</p>
    {{ERROR_BLOCK}}
    <form method="post" action="/login" style="display: grid; gap: 14px;">
      <label>Email
        <input type="email" name="email" value="{{EMAIL}}" required />
      </label>
      <label>Password
        <input type="password" name="password" required />
      </label>
      <div class="remember-row">
        <input type="checkbox" id="rememberMe" name="remember_me" {{REMEMBER_CHECKED}} />
        <label for="rememberMe">Remember my email</label>
      </div>
      <button class="submit-btn" type="submit">Sign in</button>
    </form>
    <div class="switch-link">No account yet? <a href="/register">Register</a></div>
  </main>
</body>
</html>
"##;

const REGISTER_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Register - Attendance</title>
  <style>
{{SHARED_CSS}}
{{AUTH_CSS}}
  </style>
</head>
<body>
  <main class="auth-card">
    <h1>Create your account</h1>
    <p class="subtitle">Join your company's attendance workspace.</p>
    {{ERROR_BLOCK}}
    <form method="post" action="/register" style="display: grid; gap: 14px;">
      <label>Full name
        <input type="text" name="name" required />
      </label>
      <label>Email
        <input type="email" name="email" required />
      </label>
      <label>Position
        <input type="text" name="position" required />
      </label>
      <label>Company code
        <input type="text" name="company_code" required />
      </label>
      <label>Password
        <input type="password" name="password" required />
      </label>
      <button class="submit-btn" type="submit">Register</button>
    </form>
    <div class="switch-link">Already registered? <a href="/login">Sign in</a></div>
  </main>
</body>
</html>
"##;

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance Dashboard</title>
  <style>
{{SHARED_CSS}}

    .layout {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 24px 18px 48px;
      display: grid;
      gap: 22px;
    }

    header.topbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .user-chip {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .user-initial {
      width: 42px;
      height: 42px;
      border-radius: 50%;
      background: var(--accent);
      color: #10141c;
      display: grid;
      place-items: center;
      font-weight: 700;
      font-size: 1.1rem;
    }

    .user-chip .who {
      display: grid;
    }

    .user-chip .name {
      font-weight: 600;
    }

    .user-chip .role {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .logout-btn {
      border: 1px solid var(--border);
      border-radius: 10px;
      background: var(--panel);
      color: var(--ink);
      padding: 9px 16px;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .card {
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 14px;
      padding: 16px;
      display: grid;
      gap: 6px;
    }

    .card .label {
      color: var(--muted);
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .card .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .panels {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 22px;
      align-items: start;
    }

    @media (max-width: 860px) {
      .panels {
        grid-template-columns: 1fr;
      }
    }

    section.panel {
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 14px;
      padding: 18px;
      display: grid;
      gap: 14px;
    }

    section.panel h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .actions-row {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    .action-btn {
      border: none;
      border-radius: 10px;
      padding: 11px 20px;
      font-weight: 600;
      background: var(--accent);
      color: #10141c;
    }

    .action-btn.secondary {
      background: var(--panel-soft);
      color: var(--ink);
      border: 1px solid var(--border);
    }

    .action-btn:disabled {
      opacity: 0.4;
      cursor: not-allowed;
    }

    .attendance-message {
      min-height: 1.2em;
      font-size: 0.9rem;
    }

    .attendance-message.success { color: var(--accent); }
    .attendance-message.error { color: var(--danger); }

    .offday-banner {
      display: none;
      background: rgba(255, 183, 77, 0.12);
      border: 1px solid rgba(255, 183, 77, 0.4);
      color: #ffb74d;
      border-radius: 10px;
      padding: 10px 12px;
      font-size: 0.9rem;
    }

    .offday-banner.show { display: block; }

    .filters {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    .filter-btn {
      border: 1px solid var(--border);
      border-radius: 999px;
      background: var(--panel-soft);
      color: var(--muted);
      padding: 6px 14px;
      font-size: 0.85rem;
    }

    .filter-btn.active {
      background: var(--accent);
      border-color: var(--accent);
      color: #10141c;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th, td {
      text-align: left;
      padding: 9px 10px;
      border-bottom: 1px solid var(--border);
    }

    th {
      color: var(--muted);
      font-weight: 500;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
    }

    td.empty-row {
      text-align: center;
      padding: 30px;
      color: var(--muted);
    }

    .status-badge {
      display: inline-block;
      border-radius: 999px;
      padding: 3px 10px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .status-present { background: rgba(102, 255, 0, 0.15); color: var(--accent); }
    .status-late { background: rgba(255, 183, 77, 0.15); color: #ffb74d; }
    .status-early { background: rgba(100, 181, 246, 0.15); color: #64b5f6; }
    .status-absent { background: rgba(255, 93, 93, 0.15); color: var(--danger); }
    .status-offday { background: rgba(141, 151, 171, 0.15); color: var(--muted); }

    .today-status p {
      margin: 4px 0;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .today-status strong {
      color: var(--ink);
    }

    .calendar-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .calendar-nav-btn {
      border: 1px solid var(--border);
      border-radius: 8px;
      background: var(--panel-soft);
      color: var(--ink);
      padding: 4px 12px;
      font-size: 1rem;
    }

    .calendar-month-year {
      font-weight: 600;
    }

    .calendar-weekdays, .calendar-days {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .calendar-weekday {
      text-align: center;
      color: var(--muted);
      font-size: 0.75rem;
      padding: 4px 0;
    }

    .calendar-day {
      text-align: center;
      padding: 7px 0;
      border-radius: 8px;
      font-size: 0.85rem;
    }

    .calendar-day.off-day {
      color: var(--danger);
      background: rgba(255, 93, 93, 0.08);
    }

    .calendar-day.today {
      outline: 2px solid var(--accent);
      font-weight: 700;
    }

    .calendar-day.other-month {
      visibility: hidden;
    }

    .clock-widget {
      display: grid;
      justify-items: center;
      gap: 10px;
    }

    #clockSvg {
      width: 180px;
      height: 180px;
    }

    .clock-face {
      fill: rgba(102, 255, 0, 0.12);
      stroke: var(--border);
      stroke-width: 2;
    }

    .clock-center {
      fill: rgba(102, 255, 0, 0.4);
    }

    .clock-hand {
      stroke: var(--ink);
      stroke-width: 6;
      stroke-linecap: round;
    }

    .clock-hand.second {
      stroke: var(--accent);
      stroke-width: 2;
    }

    .clock-numeral {
      fill: var(--ink);
      font-size: 13px;
      font-weight: 700;
      text-anchor: middle;
      dominant-baseline: central;
    }

    #clock-time-12h {
      font-size: 1.3rem;
      font-weight: 600;
    }

    #clock-date {
      color: var(--muted);
      font-size: 0.85rem;
    }
  </style>
</head>
<body>
  <main class="layout">
    <header class="topbar">
      <div class="user-chip">
        <div class="user-initial">{{USER_INITIAL}}</div>
        <div class="who">
          <span class="name">{{USER_NAME}}</span>
          <span class="role">{{USER_ROLE}}</span>
        </div>
      </div>
      <form method="post" action="/logout">
        <button class="logout-btn" type="submit">Logout</button>
      </form>
    </header>

    <section class="cards">
      <div class="card">
        <span class="label">Total days</span>
        <span class="value" id="totalDays">0</span>
      </div>
      <div class="card">
        <span class="label">Present</span>
        <span class="value" id="presentDays">0</span>
      </div>
      <div class="card">
        <span class="label">Late</span>
        <span class="value" id="lateDays">0</span>
      </div>
      <div class="card">
        <span class="label">Absent</span>
        <span class="value" id="absentDays">0</span>
      </div>
    </section>

    <div class="panels">
      <div style="display: grid; gap: 22px;">
        <section class="panel">
          <h2>Today</h2>
          <div class="offday-banner" id="offDayMessage"></div>
          <div class="actions-row">
            <button class="action-btn" id="checkInBtn" type="button">Check in</button>
            <button class="action-btn secondary" id="checkOutBtn" type="button">Check out</button>
          </div>
          <div class="attendance-message" id="attendanceMessage"></div>
          <div class="today-status" id="todayStatusContent"></div>
        </section>

        <section class="panel">
          <h2>Attendance records</h2>
          <div class="filters">
            <button class="filter-btn active" type="button" data-filter="all">All</button>
            <button class="filter-btn" type="button" data-filter="week">This week</button>
            <button class="filter-btn" type="button" data-filter="month">This month</button>
          </div>
          <table>
            <thead>
              <tr>
                <th>Date</th>
                <th>Name</th>
                <th>Day</th>
                <th>Check-in</th>
                <th>Check-out</th>
                <th>Status</th>
                <th>Hours</th>
              </tr>
            </thead>
            <tbody id="attendanceTableBody"></tbody>
          </table>
        </section>
      </div>

      <div style="display: grid; gap: 22px;">
        <section class="panel clock-widget">
          <svg id="clockSvg" viewBox="-100 -100 200 200" role="img" aria-label="Analog clock">
            <circle class="clock-face" r="90" />
            <g id="clockNumerals"></g>
            <line id="hourHand" class="clock-hand" x1="0" y1="0" x2="0" y2="-45" />
            <line id="minuteHand" class="clock-hand" x1="0" y1="0" x2="0" y2="-72" />
            <line id="secondHand" class="clock-hand second" x1="0" y1="0" x2="0" y2="-81" />
            <circle class="clock-center" r="9" />
          </svg>
          <div id="clock-time-12h"></div>
          <div id="clock-date"></div>
        </section>

        <section class="panel">
          {{CALENDAR}}
        </section>
      </div>
    </div>
  </main>

  <script>
    const messageEl = document.getElementById('attendanceMessage');
    const checkInBtn = document.getElementById('checkInBtn');
    const checkOutBtn = document.getElementById('checkOutBtn');
    const filterButtons = Array.from(document.querySelectorAll('.filter-btn'));

    let activeFilter = 'all';
    let messageTimer = null;

    const showMessage = (message, type) => {
      messageEl.textContent = message;
      messageEl.className = 'attendance-message ' + (type || '');
      if (messageTimer) {
        clearTimeout(messageTimer);
      }
      messageTimer = setTimeout(() => {
        messageEl.textContent = '';
        messageEl.className = 'attendance-message';
      }, 5000);
    };

    const guard = (res) => {
      if (res.status === 401) {
        window.location.href = '/login';
        return false;
      }
      return true;
    };

    const renderRecords = (view) => {
      const tbody = document.getElementById('attendanceTableBody');
      tbody.innerHTML = '';

      if (view.rows.length === 0) {
        const row = document.createElement('tr');
        const cell = document.createElement('td');
        cell.colSpan = 7;
        cell.className = 'empty-row';
        cell.textContent = view.message || 'No attendance records found';
        row.appendChild(cell);
        tbody.appendChild(row);
      } else {
        view.rows.forEach((record) => {
          const row = document.createElement('tr');
          [record.date, record.name, record.day_name, record.check_in, record.check_out].forEach((value) => {
            const td = document.createElement('td');
            td.textContent = value;
            row.appendChild(td);
          });

          const statusTd = document.createElement('td');
          const badge = document.createElement('span');
          badge.className = 'status-badge ' + record.status_class;
          badge.textContent = record.status_label;
          statusTd.appendChild(badge);
          row.appendChild(statusTd);

          const hoursTd = document.createElement('td');
          hoursTd.textContent = record.working_hours;
          row.appendChild(hoursTd);

          tbody.appendChild(row);
        });
      }

      document.getElementById('totalDays').textContent = view.summary.total_days;
      document.getElementById('presentDays').textContent = view.summary.present_days;
      document.getElementById('lateDays').textContent = view.summary.late_days;
      document.getElementById('absentDays').textContent = view.summary.absent_days;
    };

    const loadRecords = async (filter) => {
      const res = await fetch('/api/records?filter=' + encodeURIComponent(filter));
      if (!guard(res)) return;
      if (!res.ok) {
        showMessage(await res.text(), 'error');
        return;
      }
      renderRecords(await res.json());
    };

    const loadToday = async () => {
      const res = await fetch('/api/today');
      if (!guard(res)) return;
      const target = document.getElementById('todayStatusContent');
      if (!res.ok) {
        target.innerHTML = '<p>Error loading today\'s status. Please try again.</p>';
        return;
      }
      const view = await res.json();
      if (view.row) {
        const r = view.row;
        target.innerHTML =
          '<p><strong>Date:</strong> ' + r.date + '</p>' +
          '<p><strong>Check-In:</strong> ' + r.check_in + '</p>' +
          '<p><strong>Check-Out:</strong> ' + r.check_out + '</p>' +
          '<p><strong>Status:</strong> <span class="status-badge ' + r.status_class + '">' + r.status_label + '</span></p>' +
          '<p><strong>Working Hours:</strong> ' + r.working_hours + ' hours</p>';
      } else {
        target.innerHTML = '<p>' + (view.message || '') + '</p>';
      }
    };

    const loadOffDay = async () => {
      const res = await fetch('/api/offday');
      if (!guard(res)) return;
      if (!res.ok) return;
      const view = await res.json();
      const banner = document.getElementById('offDayMessage');
      if (view.is_off_day) {
        banner.textContent = view.message || 'Today is an off day.';
        banner.classList.add('show');
        checkInBtn.disabled = true;
        checkOutBtn.disabled = true;
      } else {
        banner.classList.remove('show');
        checkInBtn.disabled = false;
        checkOutBtn.disabled = false;
      }
    };

    const sendAction = async (path) => {
      let data = null;
      try {
        const res = await fetch(path, { method: 'POST' });
        if (!guard(res)) return;
        data = await res.json();
      } catch (err) {
        showMessage('Network error. Please try again.', 'error');
        return;
      }
      showMessage(data.message, data.ok ? 'success' : 'error');
      if (data.ok) {
        setTimeout(() => {
          loadRecords(activeFilter);
          loadToday();
        }, 1000);
      }
    };

    checkInBtn.addEventListener('click', () => sendAction('/attendance/checkin'));
    checkOutBtn.addEventListener('click', () => sendAction('/attendance/checkout'));

    filterButtons.forEach((button) => {
      button.addEventListener('click', () => {
        activeFilter = button.dataset.filter;
        filterButtons.forEach((b) => b.classList.toggle('active', b === button));
        loadRecords(activeFilter);
      });
    });

    let numeralsDrawn = false;

    const drawNumerals = (numerals) => {
      const group = document.getElementById('clockNumerals');
      numerals.forEach((numeral) => {
        const text = document.createElementNS('http://www.w3.org/2000/svg', 'text');
        text.setAttribute('x', (numeral.x * 90).toFixed(2));
        text.setAttribute('y', (numeral.y * 90).toFixed(2));
        text.setAttribute('class', 'clock-numeral');
        text.textContent = numeral.value;
        group.appendChild(text);
      });
    };

    const setHand = (id, angle) => {
      document.getElementById(id).setAttribute('transform', 'rotate(' + angle + ')');
    };

    const tickClock = async () => {
      let clock = null;
      try {
        const res = await fetch('/api/clock');
        if (!res.ok) return;
        clock = await res.json();
      } catch (err) {
        return;
      }
      if (!numeralsDrawn) {
        drawNumerals(clock.numerals);
        numeralsDrawn = true;
      }
      setHand('hourHand', clock.hour_angle);
      setHand('minuteHand', clock.minute_angle);
      setHand('secondHand', clock.second_angle);
      document.getElementById('clock-time-12h').textContent = clock.time_12h;
      document.getElementById('clock-date').textContent = clock.date_line;
    };

    setInterval(tickClock, 1000);
    tickClock();

    loadRecords(activeFilter);
    loadToday();
    loadOffDay();
  </script>
</body>
</html>
"##;
