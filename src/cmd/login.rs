// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;

use crate::client::Client;
use crate::error::Fallible;
use crate::error::fail;

/// Signs in and prints the token, for use with `--token` or `XPBOARD_TOKEN`.
pub async fn login(client: &Client, username: &str, password: Option<String>) -> Fallible<()> {
    let password = match password {
        Some(password) => password,
        None => read_password(std::io::stdin().lock())?,
    };
    let token = client.sign_in(username, &password).await?;
    log::info!("Signed in as {username}.");
    println!("{token}");
    Ok(())
}

fn read_password(mut input: impl BufRead) -> Fallible<String> {
    eprintln!("Password:");
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return fail("no password given.");
    }
    Ok(password)
}
