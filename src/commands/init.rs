//! Initialize a new portfolio site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::content::Category;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Site
name: Jane Doe
title: Jane Doe
description: Software engineer who builds reliable systems.
tagline: Building things that last.
email: jane@example.com
social:
  github: https://github.com/janedoe
  linkedin: https://www.linkedin.com/in/janedoe

# Navigation, in display order
nav_items:
  - label: Home
    href: /
  - label: Projects
    href: /#projects
    is_anchor: true
  - label: Resume
    href: /resume
  - label: Experience
    href: /experience
  - label: Extracurricular
    href: /extracurricular
  - label: Volunteer
    href: /volunteer
  - label: Photography
    href: /photography

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public
static_dir: static

# Home page
timeline_limit: 8

# Footer timestamp zone (IANA name); empty means local time
timezone: ''

highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Static Portfolio
description: The generator that built this site.
tags: [rust, tera, markdown]
featured: true
repo: https://github.com/janedoe/portfolio
dates:
  start: 2024-01
---

Renders Markdown content with YAML front-matter into a static site.
"#;

const SAMPLE_JOB: &str = r#"---
title: Software Engineer
description: Built and operated data pipelines.
organization: Example Corp
role: Backend Engineer
location: Remote
tags: [rust, postgres]
dates:
  start: 2022-06
  end: present
---

- Cut nightly batch runtime in half
- Owned the on-call rotation for ingestion services
"#;

const SAMPLE_VOLUNTEER: &str = r#"---
title: Code Club Mentor
description: Taught programming basics to secondary school students.
organization: Local Library
dates:
  start: 2021-09
  end: 2023-06
---
"#;

const SAMPLE_EXTRACURRICULAR: &str = r#"---
title: Chess Club
description: Organised weekly casual and rated games.
role: President
dates:
  start: 2019-09
  end: 2021-05
---

Grew the club from a handful of regulars to a full room every week.
"#;

const SAMPLE_PHOTO: &str = r#"---
title: Harbour at Dawn
description: First light over the fishing boats.
image: /photography/harbour.jpg
location: Lisbon
date: 2023-05-14
---
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{:?} already exists, refusing to overwrite", config_path);
    }

    fs::create_dir_all(target_dir)?;
    for category in Category::ALL {
        fs::create_dir_all(target_dir.join("content").join(category.dir_name()))?;
    }
    fs::create_dir_all(target_dir.join("static/photography"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let samples = [
        (Category::Projects, "static-portfolio.md", SAMPLE_PROJECT),
        (Category::Jobs, "example-corp.md", SAMPLE_JOB),
        (Category::Volunteer, "code-club.md", SAMPLE_VOLUNTEER),
        (Category::Extracurricular, "chess-club.md", SAMPLE_EXTRACURRICULAR),
        (Category::Photography, "harbour-at-dawn.md", SAMPLE_PHOTO),
    ];
    for (category, file, body) in samples {
        let path = target_dir
            .join("content")
            .join(category.dir_name())
            .join(file);
        if !path.exists() {
            fs::write(&path, body)?;
        }
    }

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}
