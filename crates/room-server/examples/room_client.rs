//! Example: join a room and watch or play from the terminal.
//!
//! Usage:
//!
//! ```bash
//! # Run server
//! cargo run -p room-server
//!
//! # In other terminals
//! cargo run -p room-server --example room_client -- myroom
//! ```
//!
//! Commands typed on stdin:
//! - `name <text>`  set your display name (players only)
//! - `move <col>`   drop a disc in column `col`
//! - `quit`

use std::env;

use anyhow::{Context, Result};
use room_core::{ClientEvent, MoveEvent, NameChange, Role, ServerEvent};
use room_protocol::{decode_server_line, encode_client, encode_handshake};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<()> {
    let room = env::args().nth(1);
    let addr = env::var("ROOM_CLIENT_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    println!("Connecting to {}...", addr);
    let stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("connecting to {}", addr))?;
    let (read_half, mut write_half) = stream.into_split();

    let hello = encode_handshake(room.as_deref())?;
    write_half.write_all(format!("{}\n", hello).as_bytes()).await?;

    let mut server_lines = BufReader::new(read_half).lines();
    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();
    let mut me = Role::Spectator;

    loop {
        tokio::select! {
            line = server_lines.next_line() => {
                let Some(line) = line? else {
                    println!("Server closed the connection.");
                    break;
                };
                match decode_server_line(&line) {
                    Ok(ServerEvent::PlayerAssignment(role)) => {
                        me = role;
                        println!("<< you are {}", role);
                    }
                    Ok(ServerEvent::NameUpdate(names)) => {
                        println!("<< names: 1={:?} 2={:?}", names.player1, names.player2);
                    }
                    Ok(ServerEvent::Move(mv)) => println!("<< move col={}", mv.col),
                    Err(e) => eprintln!("<< unreadable line ({}): {}", e, line),
                }
            }
            line = stdin_lines.next_line() => {
                let Some(line) = line? else { break };
                let event = match parse_command(line.trim(), me) {
                    Command::Send(event) => event,
                    Command::Quit => break,
                    Command::Invalid => {
                        eprintln!("commands: name <text> | move <col> | quit");
                        continue;
                    }
                };
                let out = encode_client(&event)?;
                write_half.write_all(format!("{}\n", out).as_bytes()).await?;
            }
        }
    }

    Ok(())
}

enum Command {
    Send(ClientEvent),
    Quit,
    Invalid,
}

fn parse_command(line: &str, me: Role) -> Command {
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "quit" | "exit" => Command::Quit,
        "name" if !rest.is_empty() => Command::Send(ClientEvent::SetName(NameChange {
            player: me.as_u8(),
            name: rest.to_string(),
        })),
        "move" => match rest.trim().parse::<i64>() {
            Ok(col) => Command::Send(ClientEvent::Move(MoveEvent { col })),
            Err(_) => Command::Invalid,
        },
        _ => Command::Invalid,
    }
}
