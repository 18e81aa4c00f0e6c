//! Newsgroup listing and information commands (RFC 3977, RFC 6048)
//!
//! This module contains all LIST variants, NEWGROUPS, and NEWNEWS commands.

use super::NntpClient;
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// List active newsgroups (RFC 3977 Section 7.6.3)
    ///
    /// Returns a list of active newsgroups matching the wildmat pattern.
    /// Format: group high low status
    ///
    /// # Arguments
    ///
    /// * `wildmat` - Wildmat pattern (e.g., "comp.*", "*" for all groups)
    ///
    /// # Returns
    ///
    /// Vector of [`commands::ActiveGroup`] entries containing:
    /// - name: newsgroup name
    /// - high: highest article number
    /// - low: lowest article number
    /// - status: 'y' (posting allowed), 'n' (no posting), 'm' (moderated)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn list_active(&mut self, wildmat: &str) -> Result<Vec<commands::ActiveGroup>> {
        debug!("Listing active groups matching: {}", wildmat);

        let cmd = commands::list_active(wildmat);
        self.send_command(&cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let groups = commands::parse_list_active_response(response)?;
        debug!("Retrieved {} active groups", groups.len());
        Ok(groups)
    }

    /// List newsgroups with descriptions (RFC 3977 Section 7.6.6).
    ///
    /// Returns newsgroup names matching the wildmat pattern along with their descriptions.
    /// The wildmat pattern supports `*` (matches any sequence) and `?` (matches single character).
    /// Use `*` to list all newsgroups.
    ///
    /// # Arguments
    ///
    /// * `wildmat` - Wildmat pattern to match newsgroup names (e.g., "comp.*", "alt.binaries.*", "*")
    ///
    /// # Returns
    ///
    /// Returns a `Vec<NewsgroupInfo>` where each entry contains:
    /// - name: newsgroup name
    /// - description: human-readable description of the newsgroup
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn list_newsgroups(&mut self, wildmat: &str) -> Result<Vec<commands::NewsgroupInfo>> {
        debug!("Listing newsgroups matching: {}", wildmat);

        let cmd = commands::list_newsgroups(wildmat);
        self.send_command(&cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let groups = commands::parse_list_newsgroups_response(response)?;
        debug!("Retrieved {} newsgroup descriptions", groups.len());
        Ok(groups)
    }

    /// List the overview format fields
    ///
    /// Returns the field names in the order they appear in OVER/XOVER output.
    /// Fields may be header names (e.g., "Subject:") or metadata (e.g., ":bytes").
    ///
    /// RFC 3977 Section 8.4
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn list_overview_fmt(&mut self) -> Result<Vec<String>> {
        debug!("Requesting overview format");

        let cmd = commands::list_overview_fmt();
        self.send_command(cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let fields = commands::parse_list_overview_fmt_response(response)?;
        debug!("Retrieved {} overview format fields", fields.len());
        Ok(fields)
    }

    /// Retrieve list of header fields available for HDR command (RFC 3977 ยง8.6)
    ///
    /// Returns a list of header field names that can be used with the HDR command.
    /// The optional `keyword` parameter specifies which form of HDR the results apply to:
    /// - `None`: List all available headers
    /// - `Some("MSGID")`: List headers available for HDR with message-id
    /// - `Some("RANGE")`: List headers available for HDR with range
    ///
    /// A special entry ":" in the response means any header may be retrieved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn list_headers(&mut self, keyword: Option<&str>) -> Result<Vec<String>> {
        debug!("Requesting header fields list (keyword: {:?})", keyword);

        let cmd = match keyword {
            None => commands::list_headers(),
            Some("MSGID") => commands::list_headers_msgid(),
            Some("RANGE") => commands::list_headers_range(),
            Some(other) => {
                return Err(NntpError::InvalidResponse(format!(
                    "Invalid LIST HEADERS keyword: {}. Must be MSGID or RANGE",
                    other
                )));
            }
        };

        self.send_command(cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let headers = commands::parse_list_headers_response(response)?;
        debug!("Retrieved {} header fields", headers.len());
        Ok(headers)
    }

    /// List newsgroup creation times (LIST ACTIVE.TIMES)
    ///
    /// Returns a list of newsgroups with creation timestamp and creator.
    /// The wildmat parameter can filter groups (e.g., "comp.*" or "*").
    ///
    /// RFC 3977 Section 7.6.4
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn list_active_times(&mut self, wildmat: &str) -> Result<Vec<commands::GroupTime>> {
        debug!("Requesting newsgroup creation times (wildmat: {})", wildmat);

        let cmd = commands::list_active_times(wildmat);
        self.send_command(&cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let groups = commands::parse_list_active_times_response(response)?;
        debug!("Retrieved {} newsgroup creation times", groups.len());
        Ok(groups)
    }

    /// List newsgroups with estimated article counts (RFC 6048 Section 3).
    ///
    /// Returns newsgroup information matching the wildmat pattern with estimated article counts.
    /// This is an enhanced version of LIST ACTIVE that includes article counts.
    /// The wildmat pattern supports `*` (matches any sequence) and `?` (matches single character).
    /// Use `*` to list all newsgroups.
    ///
    /// # Arguments
    ///
    /// * `wildmat` - Pattern to match newsgroup names (e.g., "comp.*", "alt.binaries.*", "*")
    ///
    /// # Returns
    ///
    /// A vector of [`CountsGroup`](commands::CountsGroup) entries containing:
    /// - Newsgroup name
    /// - Estimated article count
    /// - Low water mark (lowest article number)
    /// - High water mark (highest article number)
    /// - Posting status ('y' = allowed, 'n' = not allowed, 'm' = moderated)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use newsflow_engine::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ServerConfig::plain("news.example.com", "user", "pass");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    ///
    /// // List all newsgroups with counts
    /// let groups = client.list_counts("*").await?;
    /// for group in groups {
    ///     println!("{}: {} articles ({}-{})",
    ///         group.name, group.count, group.low, group.high);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::InvalidResponse`] - Could not parse the server response
    ///
    /// # Note
    ///
    /// Not all servers support this command. If unsupported, use [`list_active`](Self::list_active)
    /// instead and calculate counts manually (high - low).
    pub async fn list_counts(&mut self, wildmat: &str) -> Result<Vec<commands::CountsGroup>> {
        debug!("Listing newsgroups with counts matching: {}", wildmat);

        let cmd = commands::list_counts(wildmat);
        self.send_command(&cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let groups = commands::parse_list_counts_response(response)?;
        debug!("Retrieved {} newsgroups with counts", groups.len());
        Ok(groups)
    }

    /// List valid distribution names and descriptions (RFC 6048 Section 4).
    ///
    /// Returns a list of distribution names with their descriptions. Distributions
    /// are used to limit article propagation to specific geographic or organizational
    /// areas (e.g., "local", "usa", "fr").
    ///
    /// No wildmat argument is permitted for this command - it returns all distributions.
    ///
    /// # Returns
    ///
    /// A vector of [`DistributionInfo`](commands::DistributionInfo) entries, each containing:
    /// - Distribution name (e.g., "local", "usa", "fr")
    /// - Short description of the distribution area
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use newsflow_engine::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ServerConfig::plain("news.example.com", "user", "pass");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    ///
    /// // List all available distributions
    /// let distributions = client.list_distributions().await?;
    /// for dist in distributions {
    ///     println!("{}: {}", dist.name, dist.description);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an error (e.g., 503 if not available)
    /// - [`NntpError::InvalidResponse`] - Could not parse the server response
    ///
    /// # Note
    ///
    /// Not all servers support this command. If the server returns 503 (not available),
    /// the server does not maintain a distribution list.
    pub async fn list_distributions(&mut self) -> Result<Vec<commands::DistributionInfo>> {
        debug!("Listing distributions");

        let cmd = commands::list_distributions();
        self.send_command(cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let distributions = commands::parse_list_distributions_response(response)?;
        debug!("Retrieved {} distributions", distributions.len());
        Ok(distributions)
    }

    /// List moderator submission addresses (RFC 6048 Section 5).
    ///
    /// Returns a list of submission address templates for moderated newsgroups.
    /// Each entry contains a pattern (newsgroup name or wildmat) and an address template.
    ///
    /// # Format
    ///
    /// - `%s` in the address is replaced with the newsgroup name (periods converted to dashes)
    /// - `%%` represents a literal `%` character
    /// - Patterns are matched in order; the first match is used
    ///
    /// # Returns
    ///
    /// A vector of [`ModeratorInfo`](commands::ModeratorInfo) entries containing:
    /// - Pattern: newsgroup name or wildmat pattern
    /// - Address: submission address template
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use newsflow_engine::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ServerConfig::plain("news.example.com", "user", "pass");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    ///
    /// // Get moderator submission addresses
    /// let moderators = client.list_moderators().await?;
    /// for m in moderators {
    ///     println!("{}: {}", m.pattern, m.address);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_moderators(&mut self) -> Result<Vec<commands::ModeratorInfo>> {
        debug!("Listing moderators");

        let cmd = commands::list_moderators();
        self.send_command(cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let moderators = commands::parse_list_moderators_response(response)?;
        debug!("Retrieved {} moderator entries", moderators.len());
        Ok(moderators)
    }

    /// Retrieve the server's message of the day (RFC 6048 Section 6).
    ///
    /// Returns the server's message of the day as a vector of text lines.
    /// The MOTD typically contains welcome messages, server status updates,
    /// announcements, or other information the server administrator wants to
    /// communicate to users.
    ///
    /// # Returns
    ///
    /// A vector of strings, where each string is a line from the message of the day.
    /// Empty lines are preserved as they may be part of the formatted message.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use newsflow_engine::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ServerConfig::plain("news.example.com", "user", "pass");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    /// let motd = client.list_motd().await?;
    /// for line in motd {
    ///     println!("{}", line);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_motd(&mut self) -> Result<Vec<String>> {
        debug!("Retrieving message of the day");

        let cmd = commands::list_motd();
        self.send_command(cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let motd = commands::parse_list_motd_response(response)?;
        debug!("Retrieved {} MOTD lines", motd.len());
        Ok(motd)
    }

    /// Retrieve the server's default subscription list (RFC 6048 Section 7).
    ///
    /// Returns a list of newsgroups that the server recommends for new users to subscribe to.
    /// This is typically a curated list of popular or important newsgroups on the server.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use newsflow_engine::NntpClient;
    /// # async fn example(client: &mut NntpClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let subscriptions = client.list_subscriptions().await?;
    /// for group in subscriptions {
    ///     println!("Recommended: {}", group);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_subscriptions(&mut self) -> Result<Vec<String>> {
        debug!("Retrieving default subscription list");

        let cmd = commands::list_subscriptions();
        self.send_command(cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let subscriptions = commands::parse_list_subscriptions_response(response)?;
        debug!("Retrieved {} subscription entries", subscriptions.len());
        Ok(subscriptions)
    }

    /// List newsgroups created after a specific date/time (RFC 3977 Section 7.3).
    ///
    /// Returns information about newsgroups created since the specified date and time.
    /// The response format is identical to LIST ACTIVE (group high low status).
    ///
    /// # Arguments
    ///
    /// * `date` - Date in format "yyyymmdd" (e.g., "20240101" for January 1, 2024)
    /// * `time` - Time in format "hhmmss" (e.g., "120000" for 12:00:00)
    /// * `gmt` - If true, uses GMT timezone; if false, uses server's local time
    ///
    /// # Returns
    ///
    /// A vector of [`ActiveGroup`](commands::ActiveGroup) entries containing:
    /// - Newsgroup name
    /// - High water mark (highest article number)
    /// - Low water mark (lowest article number)
    /// - Posting status ('y' = allowed, 'n' = not allowed, 'm' = moderated)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use newsflow_engine::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ServerConfig::plain("news.example.com", "user", "pass");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    ///
    /// // Get newsgroups created since January 1, 2024 at midnight GMT
    /// let new_groups = client.newgroups("20240101", "000000", true).await?;
    /// for group in new_groups {
    ///     println!("New group: {} ({}-{})", group.name, group.low, group.high);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::InvalidResponse`] - Could not parse the server response
    pub async fn newgroups(
        &mut self,
        date: &str,
        time: &str,
        gmt: bool,
    ) -> Result<Vec<commands::ActiveGroup>> {
        debug!(
            "Requesting newsgroups created since {} {} (GMT: {})",
            date, time, gmt
        );

        let cmd = if gmt {
            commands::newgroups_gmt(date, time)
        } else {
            commands::newgroups(date, time)
        };
        self.send_command(&cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::NEW_NEWSGROUPS_FOLLOW {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let groups = commands::parse_newgroups_response(response)?;
        debug!("Retrieved {} new newsgroups", groups.len());
        Ok(groups)
    }

    /// Retrieve message-IDs of articles posted after a specific date/time (RFC 3977 ยง7.4)
    ///
    /// Lists message-IDs of articles posted to newsgroups matching the wildmat pattern
    /// since the specified date and time.
    ///
    /// # Arguments
    ///
    /// * `wildmat` - Newsgroup pattern (e.g., "comp.lang.*", "alt.binaries.*", "*")
    /// * `date` - Date in format "yyyymmdd" (e.g., "20240101" for January 1, 2024)
    /// * `time` - Time in format "hhmmss" (e.g., "120000" for 12:00:00)
    /// * `gmt` - If true, use GMT; if false, use server local time
    ///
    /// # Returns
    ///
    /// Returns a vector of message-IDs (e.g., "<abc@example.com>") for articles posted
    /// to matching newsgroups since the specified date/time.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use newsflow_engine::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ServerConfig::plain("news.example.com", "user", "pass");
    /// # let mut client = NntpClient::connect(Arc::new(config)).await?;
    /// // Get all new articles in comp.lang.rust since midnight UTC on Jan 1, 2024
    /// let message_ids = client.newnews("comp.lang.rust", "20240101", "000000", true).await?;
    /// println!("Found {} new articles", message_ids.len());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an error
    /// - [`NntpError::InvalidResponse`] - Could not parse the server response
    pub async fn newnews(
        &mut self,
        wildmat: &str,
        date: &str,
        time: &str,
        gmt: bool,
    ) -> Result<Vec<String>> {
        debug!(
            "Requesting articles since {} {} in {} (GMT: {})",
            date, time, wildmat, gmt
        );

        let cmd = if gmt {
            commands::newnews_gmt(wildmat, date, time)
        } else {
            commands::newnews(wildmat, date, time)
        };
        self.send_command(&cmd).await?;
        let response = self.read_multiline_response().await?;

        if response.code != codes::NEW_ARTICLE_LIST_FOLLOWS {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }

        let message_ids = commands::parse_newnews_response(response)?;
        debug!("Retrieved {} message-IDs", message_ids.len());
        Ok(message_ids)
    }
}
