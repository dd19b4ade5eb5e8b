//! HTML templates for the mock login pages.

use msls_core::identity::IdentityType;
use msls_core::samples::SampleUser;

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Login page for the SLS flavor.
///
/// `state` and `redirect_uri` round-trip through hidden inputs so the submit
/// handler can build the callback redirect.
pub fn sls_login_page(state: &str, redirect_uri: &str, samples: &[SampleUser]) -> String {
    let identity_types: String = IdentityType::ALL
        .iter()
        .map(|t| {
            let checked = if *t == IdentityType::Hicn {
                r#" checked="checked""#
            } else {
                ""
            };
            let disabled = if t.is_selectable() { "" } else { " disabled" };
            format!(
                r#"<label class="radio"><input type="radio" name="beneficiary_identity" value="{code}"{checked}{disabled} /> {label}</label>
"#,
                code = t.code(),
                label = t.label(),
            )
        })
        .collect();

    let (subject_list, identity_list) = if samples.is_empty() {
        (String::new(), String::new())
    } else {
        (
            datalist("sample-subjects", samples.iter().map(|s| s.username.as_str())),
            datalist(
                "sample-identities",
                samples
                    .iter()
                    .flat_map(|s| [s.hicn.as_str(), s.mbi.as_str()]),
            ),
        )
    };

    let body = format!(
        r#"<form method="POST" action="/login">
        <input type="hidden" name="state" value="{state}" />
        <input type="hidden" name="redirect_uri" value="{redirect_uri}" />

        <label for="username">SUB (username)</label>
        <input type="text" id="username" name="username" list="sample-subjects" />

        <label for="pt_identity">BENE Id, HICN or HICN hash, MBI or MBI hash</label>
        <input type="text" id="pt_identity" name="pt_identity" list="sample-identities" />

        <fieldset>
            <legend>Identity type</legend>
            {identity_types}
        </fieldset>

        <label for="name">name</label>
        <input type="text" id="name" name="name" />

        <label for="given_name">given_name</label>
        <input type="text" id="given_name" name="given_name" />

        <label for="family_name">family_name</label>
        <input type="text" id="family_name" name="family_name" />

        <label for="email">email</label>
        <input type="text" id="email" name="email" />

        <button type="submit">Sign In</button>
    </form>
    {subject_list}
    {identity_list}"#,
        state = html_escape(state),
        redirect_uri = html_escape(redirect_uri),
    );

    page("MSLS", &body, samples)
}

/// Login page for the SLSx flavor.
pub fn slsx_login_page(relay: &str, redirect_uri: &str, samples: &[SampleUser]) -> String {
    let lists = if samples.is_empty() {
        String::new()
    } else {
        [
            datalist("sample-subjects", samples.iter().map(|s| s.username.as_str())),
            datalist("sample-hicns", samples.iter().map(|s| s.hicn.as_str())),
            datalist("sample-mbis", samples.iter().map(|s| s.mbi.as_str())),
        ]
        .concat()
    };

    let body = format!(
        r#"<form method="POST" action="/login/">
        <input type="hidden" name="relay" value="{relay}" />
        <input type="hidden" name="redirect_uri" value="{redirect_uri}" />

        <label for="username">username</label>
        <input type="text" id="username" name="username" list="sample-subjects" />

        <label for="hicn">hicn</label>
        <input type="text" id="hicn" name="hicn" list="sample-hicns" />

        <label for="mbi">mbi</label>
        <input type="text" id="mbi" name="mbi" list="sample-mbis" />

        <label for="name">name</label>
        <input type="text" id="name" name="name" />

        <label for="first_name">first_name</label>
        <input type="text" id="first_name" name="first_name" />

        <label for="last_name">last_name</label>
        <input type="text" id="last_name" name="last_name" />

        <label for="email">email</label>
        <input type="text" id="email" name="email" />

        <button type="submit">Sign In</button>
    </form>
    {lists}"#,
        relay = html_escape(relay),
        redirect_uri = html_escape(redirect_uri),
    );

    page("MSLSx", &body, samples)
}

fn datalist<'a>(id: &str, values: impl Iterator<Item = &'a str>) -> String {
    let options: String = values
        .filter(|v| !v.is_empty())
        .map(|v| format!(r#"<option value="{}"></option>"#, html_escape(v)))
        .collect();

    format!(r#"<datalist id="{id}">{options}</datalist>"#)
}

/// Table of configured sample users. Empty when there are none.
fn sample_help(samples: &[SampleUser]) -> String {
    if samples.is_empty() {
        return String::new();
    }

    let rows: String = samples
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&s.username),
                html_escape(&s.hicn),
                html_escape(&s.mbi),
                html_escape(&s.name),
                html_escape(&s.first_name),
                html_escape(&s.last_name),
                html_escape(&s.email),
            )
        })
        .collect();

    format!(
        r#"<div class="samples">
        <h3>Sample beneficiaries</h3>
        <p>Synthetic users known to the local data server. Pick one to fill the form.</p>
        <table>
            <thead><tr><th>SUB</th><th>HICN</th><th>MBI</th><th>Name</th><th>First</th><th>Last</th><th>Email</th></tr></thead>
            <tbody>{rows}</tbody>
        </table>
    </div>"#
    )
}

fn page(title: &str, form: &str, samples: &[SampleUser]) -> String {
    let help = sample_help(samples);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title} Sign In (DEV ONLY)</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            max-width: 560px;
            margin: 60px auto;
            padding: 20px;
        }}
        .warning {{
            background: #fff3cd;
            border: 1px solid #ffc107;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }}
        .warning h2 {{
            color: #856404;
            margin-top: 0;
        }}
        form, .samples {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
            margin-bottom: 20px;
        }}
        label {{
            display: block;
            margin-bottom: 5px;
            font-weight: 500;
        }}
        label.radio {{
            font-weight: normal;
        }}
        input[type="text"] {{
            width: 100%;
            padding: 10px;
            margin-bottom: 15px;
            border: 1px solid #ced4da;
            border-radius: 4px;
            box-sizing: border-box;
        }}
        fieldset {{
            margin-bottom: 15px;
            border: 1px solid #ced4da;
            border-radius: 4px;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            font-family: monospace;
        }}
        th, td {{
            text-align: left;
            padding: 4px;
            border-bottom: 1px solid #dee2e6;
        }}
        button {{
            width: 100%;
            padding: 12px;
            background: #007bff;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 16px;
        }}
        button:hover {{
            background: #0056b3;
        }}
    </style>
</head>
<body>
    <div class="warning">
        <h2>Simulated Authentication: no PHI or PII</h2>
        <p>This is a <strong>mock {title} login</strong> for local development.</p>
        <p>Use only synthetic beneficiary info. The values entered below are returned by the userinfo endpoint.</p>
    </div>

    {help}

    {form}
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<SampleUser> {
        vec![SampleUser {
            username: "-20140000008325".to_string(),
            hicn: "1000044680".to_string(),
            mbi: "2SW4N00AA00".to_string(),
            name: "Jane <Doe>".to_string(),
            email: "jane@example.com".to_string(),
            ..SampleUser::default()
        }]
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_sls_page_carries_state_and_redirect_uri() {
        let html = sls_login_page("abc123", "http://localhost:8000/mymedicare/sls-callback", &[]);

        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"name="state" value="abc123""#));
        assert!(html.contains(
            r#"name="redirect_uri" value="http://localhost:8000/mymedicare/sls-callback""#
        ));
        assert!(html.contains(r#"value="H" checked="checked" />"#));
        assert!(html.contains(r#"value="S" disabled />"#));
    }

    #[test]
    fn test_sls_page_escapes_query_values() {
        let html = sls_login_page(r#""><script>alert(1)</script>"#, "", &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_slsx_page_carries_relay() {
        let html = slsx_login_page("relay-value", "missing", &[]);

        assert!(html.contains(r#"action="/login/""#));
        assert!(html.contains(r#"name="relay" value="relay-value""#));
        assert!(html.contains(r#"name="hicn""#));
        assert!(html.contains(r#"name="mbi""#));
    }

    #[test]
    fn test_pages_without_samples_omit_help() {
        assert!(!sls_login_page("", "", &[]).contains("Sample beneficiaries"));
        assert!(!slsx_login_page("", "", &[]).contains("<datalist"));
    }

    #[test]
    fn test_pages_with_samples_render_help_and_suggestions() {
        let html = sls_login_page("", "", &samples());
        assert!(html.contains("Sample beneficiaries"));
        assert!(html.contains(r#"<option value="-20140000008325"></option>"#));
        assert!(html.contains(r#"<option value="2SW4N00AA00"></option>"#));

        let html = slsx_login_page("", "", &samples());
        assert!(html.contains(r#"<datalist id="sample-hicns"><option value="1000044680"></option></datalist>"#));
        assert!(html.contains("<td>Jane &lt;Doe&gt;</td>"));
        assert!(html.contains("<td>jane@example.com</td>"));
    }
}
