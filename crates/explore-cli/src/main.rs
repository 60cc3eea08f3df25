//! `explore`: command-line client for the explore service.
//!
//! # Usage
//!
//! ```text
//! explore liked-you 2b13bf3c-b7e3-11f0-add8-627f4e32ceb4 --page-size 10
//! explore new-liked-you 2b13bf3c-b7e3-11f0-add8-627f4e32ceb4 --all
//! explore count 2b13bf3c-b7e3-11f0-add8-627f4e32ceb4
//! explore decide <actor> <recipient> [--pass]
//! ```

mod client;

use std::time::Duration;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use client::ApiClient;
use explore_core::explore::{
  CountLikedYouRequest, LikerEntry, ListLikedYouRequest, ListLikedYouResponse,
  PutDecisionRequest,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "explore", about = "Client for the explore service")]
struct Args {
  /// Base URL of the explore server.
  #[arg(long, env = "EXPLORE_ADDR", default_value = "http://localhost:50051")]
  addr: String,

  /// Per-request timeout in seconds.
  #[arg(long, default_value_t = 5)]
  timeout: u64,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List everyone who liked a user.
  LikedYou(ListArgs),
  /// List likers the user has not liked back.
  NewLikedYou(ListArgs),
  /// Count likes received by a user.
  Count {
    recipient_id: String,
  },
  /// Record a like (default) or a pass.
  Decide {
    actor_user_id:     String,
    recipient_user_id: String,
    /// Record a pass instead of a like.
    #[arg(long)]
    pass:              bool,
  },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
  recipient_id:     String,
  #[arg(long)]
  page_size:        Option<u32>,
  /// Resume from a `next_pagination_token`.
  #[arg(long)]
  pagination_token: Option<String>,
  /// Follow pagination tokens until the listing is exhausted.
  #[arg(long)]
  all:              bool,
}

#[derive(Clone, Copy)]
enum Listing {
  All,
  New,
}

// ─── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let client = ApiClient::new(&args.addr, Duration::from_secs(args.timeout))?;

  match args.command {
    Command::LikedYou(list) => run_listing(&client, Listing::All, list).await,
    Command::NewLikedYou(list) => run_listing(&client, Listing::New, list).await,
    Command::Count { recipient_id } => {
      let resp = client
        .count_liked_you(&CountLikedYouRequest { recipient_id })
        .await?;
      print_json(&resp)
    }
    Command::Decide { actor_user_id, recipient_user_id, pass } => {
      let resp = client
        .put_decision(&PutDecisionRequest {
          actor_user_id,
          recipient_user_id,
          liked_recipient: !pass,
        })
        .await?;
      print_json(&resp)
    }
  }
}

async fn run_listing(client: &ApiClient, listing: Listing, args: ListArgs) -> Result<()> {
  let mut req = ListLikedYouRequest {
    recipient_id:     args.recipient_id,
    page_size:        args.page_size.map(Into::into),
    pagination_token: args.pagination_token,
  };

  if !args.all {
    let page = fetch_page(client, listing, &req).await?;
    return print_json(&page);
  }

  let mut likers: Vec<LikerEntry> = Vec::new();
  loop {
    let page = fetch_page(client, listing, &req).await?;
    tracing::debug!(count = page.likers.len(), "fetched page");
    likers.extend(page.likers);
    if page.next_pagination_token.is_empty() {
      break;
    }
    req.pagination_token = Some(page.next_pagination_token);
  }
  print_json(&likers)
}

async fn fetch_page(
  client: &ApiClient,
  listing: Listing,
  req: &ListLikedYouRequest,
) -> Result<ListLikedYouResponse> {
  match listing {
    Listing::All => client.list_liked_you(req).await,
    Listing::New => client.list_new_liked_you(req).await,
  }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
