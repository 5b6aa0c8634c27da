use anyhow::Result;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use signal_dashboard::charts;
use signal_dashboard::config::Config;
use signal_dashboard::controller::{DashboardController, Notice, NoticeLevel};
use signal_dashboard::store::ExportFormat;

const CHART_WIDTH: usize = 30;

/// Interactive command loop over the dashboard controller. All rendering
/// lives here; the controller never prints.
pub struct Shell {
    controller: DashboardController,
    api_base: String,
}

impl Shell {
    pub fn new(controller: DashboardController, cfg: &Config) -> Self {
        info!("{}", "=".repeat(60));
        info!("Forex Signal Dashboard");
        info!("Store:   {}", cfg.api_base_url);
        info!("Exports: {}", cfg.export_dir);
        info!("{}", "=".repeat(60));

        Self {
            controller,
            api_base: cfg.api_base_url.clone(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Warm both caches before the first prompt; failures degrade to an
        // empty dashboard rather than blocking startup.
        self.controller.load_signals().await;
        self.controller.load_analytics().await;
        self.drain_notices();

        println!("Connected to {}. Type `help` for commands.", self.api_base);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            prompt("signals> ");

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    info!("Shutting down");
                    return Ok(());
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        return Ok(());
                    };
                    if !self.dispatch(line.trim(), &mut lines).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Returns false when the loop should exit.
    async fn dispatch(&mut self, line: &str, lines: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "help" => print_help(),
            "paste" => self.cmd_paste(lines).await?,
            "group" => {
                if rest.is_empty() {
                    println!("Usage: group <name>");
                } else {
                    self.controller.set_draft_group(rest);
                    println!("Group set to \"{}\"", rest);
                }
            }
            "submit" => self.controller.submit_message().await,
            "list" => self.render_list(),
            "analytics" => self.render_analytics(),
            "charts" => self.render_charts(),
            "delete" => {
                if rest.is_empty() {
                    println!("Usage: delete <id>");
                } else {
                    self.controller.delete_signal(rest).await;
                    self.render_list();
                }
            }
            "clear" => self.cmd_clear(lines).await?,
            "export" => match ExportFormat::parse(rest) {
                Some(format) => self.controller.export_as(format).await,
                None => println!("Usage: export <csv|json>"),
            },
            "status" => self.controller.check_store().await,
            "refresh" => {
                self.controller.load_signals().await;
                self.controller.load_analytics().await;
                println!(
                    "{} signals cached.",
                    self.controller.signals().len()
                );
            }
            "quit" | "exit" => return Ok(false),
            other => println!("Unknown command `{}`. Type `help`.", other),
        }

        self.drain_notices();
        Ok(true)
    }

    async fn cmd_paste(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
        println!("Paste the alert text. Finish with an empty line.");
        let mut buffer = Vec::new();
        loop {
            match lines.next_line().await? {
                Some(line) if !line.trim().is_empty() => buffer.push(line),
                _ => break,
            }
        }
        let message = buffer.join("\n");
        self.controller.set_draft_message(message);

        let draft = self.controller.draft();
        if draft.message.trim().is_empty() {
            println!("Draft is empty.");
        } else {
            println!(
                "Draft captured ({} chars). `submit` to extract.",
                draft.message.len()
            );
        }
        Ok(())
    }

    async fn cmd_clear(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
        prompt("Delete ALL signals from the store? [y/N] ");
        let answer = lines.next_line().await?.unwrap_or_default();
        let confirmed = matches!(answer.trim(), "y" | "Y" | "yes");
        if !confirmed {
            println!("Nothing deleted.");
        }
        self.controller.clear_all(confirmed).await;
        Ok(())
    }

    fn render_list(&self) {
        let signals = self.controller.signals();
        if signals.is_empty() {
            println!("No signals yet. `paste` a message and `submit` it.");
            return;
        }

        println!("\n{}", "=".repeat(70));
        println!(
            "  {:<10} {:<8} {:<4} {:>14} {:>10} {:>10} {:>5}  {}",
            "ID", "SYMBOL", "SIDE", "ENTRY", "TP1", "SL", "CONF", "GROUP"
        );
        println!("  {}", "\u{2500}".repeat(66));
        for s in signals {
            println!(
                "  {:<10} {:<8} {:<4} {:>14} {:>10} {:>10} {:>5}  {}",
                short_id(&s.id),
                s.symbol,
                s.action,
                s.entry_label(),
                s.tp1.map(|v| format!("{:.5}", v)).unwrap_or_else(|| "-".into()),
                s.sl.map(|v| format!("{:.5}", v)).unwrap_or_else(|| "-".into()),
                s.confidence
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "-".into()),
                s.group_name,
            );
        }
        println!("{}", "=".repeat(70));
        println!("  {} signal(s)\n", signals.len());
    }

    fn render_analytics(&self) {
        let Some(snap) = self.controller.analytics() else {
            println!("No analytics yet. Run `refresh` once the store is reachable.");
            return;
        };

        println!("\n{}", "=".repeat(70));
        println!("  SIGNAL ANALYTICS");
        println!("{}", "=".repeat(70));
        println!("  Total:        {}", snap.total_signals);
        println!(
            "  Buy/Sell:     {} / {}",
            snap.buy_signals, snap.sell_signals
        );
        if let Some(ratio) = snap.buy_sell_ratio {
            println!("  B/S Ratio:    {:.2}", ratio);
        }
        println!("  Symbols:      {}", snap.total_symbols);
        if let Some(rate) = snap.signals_per_day {
            println!("  Per Day:      {:.1}", rate);
        }
        if let Some(conf) = snap.avg_confidence {
            println!("  Avg Conf:     {:.2}", conf);
        }
        if let Some(ratio) = snap.avg_tp_sl_ratio {
            println!("  Avg TP/SL:    {:.2}", ratio);
        }
        if let Some(rr) = snap.avg_risk_reward {
            println!("  Avg R/R:      {:.2}", rr);
        }
        println!("{}", "=".repeat(70));
    }

    fn render_charts(&self) {
        let Some(snap) = self.controller.analytics() else {
            println!("No analytics yet. Run `refresh` once the store is reachable.");
            return;
        };
        if snap.is_empty() {
            println!("Nothing to chart yet.");
            return;
        }

        let (buy, sell) = charts::action_split(snap);
        let side_max = buy.max(sell);
        println!("\n  ACTIONS");
        println!("  {}", "\u{2500}".repeat(40));
        println!("  {:>8} {:>4} {}", "BUY", buy, charts::bar(buy, side_max, CHART_WIDTH));
        println!("  {:>8} {:>4} {}", "SELL", sell, charts::bar(sell, side_max, CHART_WIDTH));

        render_series("SYMBOLS", &charts::symbol_series(snap));
        render_series("GROUPS", &charts::group_series(snap));
        render_series("SENTIMENT", &charts::sentiment_series(snap));
        render_series("PER DAY", &charts::daily_series(snap));
        println!();
    }

    fn drain_notices(&mut self) {
        for notice in self.controller.take_notices() {
            print_notice(&notice);
        }
    }
}

fn render_series(title: &str, series: &[charts::SeriesPoint]) {
    if series.is_empty() {
        return;
    }
    let max = series.iter().map(|p| p.value).max().unwrap_or(0);
    println!("\n  {}", title);
    println!("  {}", "\u{2500}".repeat(40));
    for point in series {
        println!(
            "  {:>12} {:>4} {}",
            point.label,
            point.value,
            charts::bar(point.value, max, CHART_WIDTH)
        );
    }
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("  [ok] {}", notice.text),
        NoticeLevel::Warning => println!("  [!]  {}", notice.text),
        NoticeLevel::Error => println!("  [x]  {}", notice.text),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  paste           capture a multi-line alert message as the draft");
    println!("  group <name>    set the source group for the next submission");
    println!("  submit          send the draft to the store for extraction");
    println!("  list            show cached signals");
    println!("  analytics       show the aggregate snapshot");
    println!("  charts          text charts over the snapshot");
    println!("  delete <id>     remove one signal");
    println!("  clear           remove every signal (asks first)");
    println!("  export <fmt>    save a csv/json export locally");
    println!("  status          probe the store's health endpoint");
    println!("  refresh         re-fetch signals and analytics");
    println!("  quit            leave");
}

fn prompt(text: &str) {
    print!("{}", text);
    std::io::stdout().flush().ok();
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
