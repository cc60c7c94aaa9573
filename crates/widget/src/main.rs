use std::sync::Arc;

use adapter::HttpCommentService;
use anyhow::Context;
use domain::{CommentId, Intent};
use dotenvy::dotenv;
use storage::Db;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use widget::config::Settings;
use widget::render::{render_status, render_tree};
use widget::{Outcome, SyncController};

const HELP: &str = "commands: login <user> <pass> | register <user> <pass> | logout | \
post <text> | reply <id> <text> | like <id> | reload | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;
    let content_id = settings
        .content_id()
        .map_err(|e| anyhow::anyhow!("Invalid content identifier: {}", e))?;

    let api = HttpCommentService::new(settings.http_config())?;
    let db = Db::new(&settings.storage.url)
        .await
        .with_context(|| format!("Failed to open credential store: {}", settings.storage.url))?;

    info!("Mounting comments for {} via {}", content_id, api.base_url());

    let controller = Arc::new(
        SyncController::new(Arc::new(api), Arc::new(db), content_id)
            .with_max_comment_chars(settings.widget.max_comment_chars),
    );

    let cancel = CancellationToken::new();
    let renderer = tokio::spawn(render_loop(controller.clone(), cancel.clone()));

    let _ = controller.load().await;
    println!("{}", HELP);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => {
                let line = match line.context("Failed to read stdin")? {
                    Some(l) => l,
                    None => break,
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Intent>() {
                    Ok(Intent::Quit) => break,
                    Ok(intent) => {
                        // 各操作独立运行，互不阻塞
                        let controller = controller.clone();
                        tokio::spawn(async move { dispatch(&controller, intent).await });
                    }
                    Err(e) => println!("{}\n{}", e, HELP),
                }
            }
        }
    }

    cancel.cancel();
    let _ = renderer.await;
    Ok(())
}

async fn dispatch(controller: &SyncController, intent: Intent) {
    let outcome = match intent {
        Intent::Login { username, password } => controller.login(&username, &password).await,
        Intent::Register { username, password } => {
            controller.register(&username, &password).await
        }
        Intent::Logout => controller.logout().await,
        Intent::Submit { content } => controller.submit(&content).await,
        Intent::Reply { target, content } => match resolve(controller, &target) {
            Some(id) => controller.reply(&id, &content).await,
            None => return println!("No comment #{} in this thread.", target),
        },
        Intent::Like { target } => match resolve(controller, &target) {
            Some(id) => controller.toggle_like(&id).await,
            None => return println!("No comment #{} in this thread.", target),
        },
        Intent::Reload => controller.load().await,
        Intent::Quit => return,
    };

    if let Outcome::Failed(e) = &outcome {
        if e.is_retryable() {
            warn!("Retryable failure: {}", e);
        }
    }
}

/// Matches the id as displayed, so numeric and string ids both work.
fn resolve(controller: &SyncController, target: &str) -> Option<CommentId> {
    controller
        .tree()
        .walk()
        .map(|(_, c)| &c.id)
        .find(|id| id.to_string() == target)
        .cloned()
}

async fn render_loop(controller: Arc<SyncController>, cancel: CancellationToken) {
    let mut trees = WatchStream::new(controller.subscribe_tree());
    let mut statuses = WatchStream::new(controller.subscribe_status());

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            Some(tree) = trees.next() => {
                println!("--- {} ({} comments) ---", controller.content_id(), tree.total());
                print!("{}", render_tree(&tree));
            }
            Some(status) = statuses.next() => {
                if let Some(line) = render_status(&status) {
                    println!("{}", line);
                }
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
