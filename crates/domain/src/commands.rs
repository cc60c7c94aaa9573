use std::str::FromStr;

// 评论 id 保持原样，由展示层对照当前树解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,
    Submit { content: String },
    Reply { target: String, content: String },
    Like { target: String },
    Reload,
    Quit,
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();

        match verb {
            "login" | "register" => {
                let mut parts = rest.split_whitespace();
                let (username, password) = match (parts.next(), parts.next()) {
                    (Some(u), Some(p)) => (u.to_string(), p.to_string()),
                    _ => return Err(format!("usage: {} <username> <password>", verb)),
                };
                Ok(if verb == "login" {
                    Intent::Login { username, password }
                } else {
                    Intent::Register { username, password }
                })
            }
            "logout" => Ok(Intent::Logout),
            // 原样保留正文，空白校验交给控制器
            "post" => Ok(Intent::Submit {
                content: rest.to_string(),
            }),
            "reply" => {
                let (target, content) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if target.is_empty() {
                    return Err("usage: reply <comment-id> <text>".to_string());
                }
                Ok(Intent::Reply {
                    target: target.to_string(),
                    content: content.to_string(),
                })
            }
            "like" => match rest.split_whitespace().next() {
                Some(target) => Ok(Intent::Like {
                    target: target.to_string(),
                }),
                None => Err("usage: like <comment-id>".to_string()),
            },
            "reload" => Ok(Intent::Reload),
            "quit" | "exit" => Ok(Intent::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}
