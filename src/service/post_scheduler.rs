use std::fmt::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};
use tokio::time::sleep;

use crate::helpers::string_helpers::truncate_with_ellipsis;
use crate::model::data::platform::Platform;
use crate::model::data::post::NO_TITLE;
use crate::service::search_service::{SearchRequest, SearchResponse, SearchService};

const SUMMARY_PREVIEW_CHARS: usize = 200;
const PUSHED_SOURCES_MAX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Every(Duration),
    DailyAt(NaiveTime),
}

impl Schedule {
    /// Interval schedules run one interval from `now`, daily schedules at the next
    /// occurrence of their wall-clock time strictly after `now`.
    pub fn next_run_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        return match self {
            Schedule::Every(interval) => {
                let interval = chrono::Duration::from_std(*interval)
                    .unwrap_or_else(|_| chrono::Duration::days(1));

                now + interval
            }
            Schedule::DailyAt(time) => {
                let today = now.date().and_time(*time);
                if today > now {
                    today
                } else {
                    today + chrono::Duration::days(1)
                }
            }
        };
    }
}

#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub platform: Platform,
    pub keyword: String,
    pub schedule: Schedule,
    pub next_run: NaiveDateTime,
}

impl ScheduledJob {
    pub fn new(platform: Platform, keyword: &str, schedule: Schedule, now: NaiveDateTime) -> ScheduledJob {
        return ScheduledJob {
            platform,
            keyword: keyword.to_string(),
            schedule,
            next_run: schedule.next_run_after(now),
        };
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        return self.next_run <= now;
    }
}

pub fn default_jobs(now: NaiveDateTime) -> Vec<ScheduledJob> {
    let nine_am = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
    let two_pm = NaiveTime::from_hms_opt(14, 0, 0).unwrap_or(NaiveTime::MIN);

    return vec![
        ScheduledJob::new(Platform::Xiaohongshu, "热门", Schedule::Every(Duration::from_secs(60 * 60)), now),
        ScheduledJob::new(Platform::Xueqiu, "热门讨论", Schedule::Every(Duration::from_secs(30 * 60)), now),
        ScheduledJob::new(Platform::Xiaohongshu, "美妆", Schedule::DailyAt(nine_am), now),
        ScheduledJob::new(Platform::Xueqiu, "股票投资", Schedule::DailyAt(two_pm), now),
    ];
}

pub struct PostScheduler {
    search_service: Arc<dyn SearchService>,
    jobs: Vec<ScheduledJob>,
    tick: Duration,
    working: Arc<AtomicBool>,
}

impl PostScheduler {
    pub fn new(search_service: Arc<dyn SearchService>, jobs: Vec<ScheduledJob>, tick: Duration) -> PostScheduler {
        return PostScheduler {
            search_service,
            jobs,
            tick,
            working: Arc::new(AtomicBool::new(false)),
        };
    }

    pub fn jobs(&self) -> &[ScheduledJob] {
        return &self.jobs;
    }

    /// Clearing the returned flag makes `start()` return after the current tick.
    pub fn working_flag(&self) -> Arc<AtomicBool> {
        return self.working.clone();
    }

    pub async fn start(&mut self) {
        if self.working.swap(true, Ordering::SeqCst) {
            warn!("PostScheduler already working");
            return;
        }

        info!("PostScheduler started with {} jobs", self.jobs.len());
        for job in &self.jobs {
            info!(
                "PostScheduler job {}/{} {:?}, next run at {}",
                job.platform,
                job.keyword,
                job.schedule,
                job.next_run
            );
        }

        let tick_seconds = self.tick.as_secs();

        loop {
            if !self.working.load(Ordering::SeqCst) {
                break;
            }

            let executed = self.run_pending(Local::now().naive_local()).await;
            if executed > 0 {
                info!("post_scheduler_loop() executed {} jobs", executed);
            }

            debug!("post_scheduler_loop() sleeping for {tick_seconds} seconds...");
            sleep(self.tick).await;
        }

        info!("PostScheduler terminated");
    }

    /// Runs every job due at `now` and moves it to its next run. Returns how many ran.
    pub async fn run_pending(&mut self, now: NaiveDateTime) -> usize {
        let mut executed = 0;

        for job in self.jobs.iter_mut() {
            if !job.is_due(now) {
                continue;
            }

            fetch_and_push(&self.search_service, job.platform, &job.keyword, now).await;

            job.next_run = job.schedule.next_run_after(now);
            executed += 1;
        }

        return executed;
    }
}

/// Searches one platform/keyword pair and prints the result. Never fails: errors are logged.
pub async fn fetch_and_push(
    search_service: &Arc<dyn SearchService>,
    platform: Platform,
    keyword: &str,
    now: NaiveDateTime
) -> bool {
    info!("fetch_and_push() fetching {} \'{}\'", platform, keyword);

    let query = platform.search_query(keyword);
    let response = match search_service.search(&SearchRequest::basic(&query)).await {
        Ok(response) => response,
        Err(error) => {
            error!("fetch_and_push() Failed to fetch {} content: {:#}", platform, error);
            return false;
        }
    };

    println!("{}", format_push(platform, keyword, &response, now));

    info!("fetch_and_push() pushed {} content", platform);
    return true;
}

pub fn format_push(platform: Platform, keyword: &str, response: &SearchResponse, now: NaiveDateTime) -> String {
    let mut output = String::with_capacity(512);

    let summary = response.answer
        .as_deref()
        .filter(|answer| !answer.is_empty())
        .map(|answer| truncate_with_ellipsis(answer, SUMMARY_PREVIEW_CHARS).to_string())
        .unwrap_or(String::from("no summary"));

    let keyword = if keyword.is_empty() { "default" } else { keyword };

    let _ = writeln!(output, "[{}] push {} content:", now.format("%H:%M:%S"), platform);
    let _ = writeln!(output, "keyword: {}", keyword);
    let _ = write!(output, "summary: {}", summary);

    if response.search_sources().is_empty() {
        let _ = write!(output, "\nhint: more content at {}", platform.home_url());
        return output;
    }

    output.push_str("\nsources:");
    for (index, source) in response.search_sources().iter().take(PUSHED_SOURCES_MAX).enumerate() {
        let _ = write!(
            output,
            "\n  {}. {}\n     {}",
            index + 1,
            source.title.as_deref().unwrap_or(NO_TITLE),
            source.url.as_deref().unwrap_or("no url")
        );
    }

    return output;
}
