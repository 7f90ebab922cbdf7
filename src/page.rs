use crate::flash::Flash;
use crate::summary::SummaryView;

/// 渲染上传页面；可选地附带 flash 消息和解析结果
pub fn render_index(flash: Option<&Flash>, results: Option<&SummaryView>) -> String {
    let flash_block = flash
        .map(|f| {
            format!(
                "    <ul class=\"flashes\">\n      <li class=\"{}\">{}</li>\n    </ul>\n",
                escape_html(&f.category),
                escape_html(&f.message)
            )
        })
        .unwrap_or_default();

    let results_block = results
        .map(|r| {
            format!(
                concat!(
                    "    <section class=\"results\">\n",
                    "      <h2>解析结果</h2>\n",
                    "      <dl>\n",
                    "        <dt>文件名</dt><dd>{}</dd>\n",
                    "        <dt>播放时长</dt><dd>{} 秒</dd>\n",
                    "        <dt>帧数</dt><dd>{} 帧</dd>\n",
                    "        <dt>FPS</dt><dd>{} fps</dd>\n",
                    "      </dl>\n",
                    "    </section>\n"
                ),
                escape_html(&r.filename),
                escape_html(&r.duration),
                r.frames,
                escape_html(&r.fps)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"zh\">\n",
            "  <head>\n",
            "    <meta charset=\"utf-8\">\n",
            "    <title>GIF 信息计数器</title>\n",
            "    <style>\n",
            "      body {{ font-family: sans-serif; max-width: 40em; margin: 2em auto; }}\n",
            "      .flashes .error {{ color: #b00020; }}\n",
            "      dt {{ font-weight: bold; }}\n",
            "    </style>\n",
            "  </head>\n",
            "  <body>\n",
            "    <h1>GIF 信息计数器</h1>\n",
            "{}",
            "    <form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n",
            "      <input type=\"file\" name=\"file\" accept=\".gif,image/gif\">\n",
            "      <button type=\"submit\">上传并解析</button>\n",
            "    </form>\n",
            "{}",
            "  </body>\n",
            "</html>\n"
        ),
        flash_block, results_block
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
